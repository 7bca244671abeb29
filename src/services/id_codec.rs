/*
 * Responsibility
 * - course の公開 ID ↔ 内部 ID (BIGSERIAL) の変換
 * - sqids の設定 (min length / alphabet) はここに閉じ込める
 */
use sqids::{Error as SqidsError, Sqids};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {value}")]
    InvalidMinLength { value: usize },
    #[error("sqids error: {0}")]
    Sqids(#[from] SqidsError),
    #[error("id must be non-negative, got {value}")]
    NegativeId { value: i64 },
    /// The public id does not name exactly one internal id.
    #[error("invalid public id")]
    Undecodable,
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId { value: id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    pub fn decode(&self, public_id: &str) -> Result<i64> {
        let nums = self.sqids.decode(public_id);
        let [n] = nums.as_slice() else {
            return Err(IdCodecError::Undecodable);
        };
        let id = i64::try_from(*n).map_err(|_| IdCodecError::Undecodable)?;

        // sqids decodes some foreign strings to a number; only the canonical
        // encoding is accepted so one course has exactly one public id.
        if self.encode(id)? != public_id {
            return Err(IdCodecError::Undecodable);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    #[test]
    fn encoded_ids_decode_back() {
        let codec = IdCodec::new(10, ALPHABET).unwrap();
        let public = codec.encode(42).unwrap();
        assert!(public.len() >= 10);
        assert_eq!(codec.decode(&public).unwrap(), 42);
    }

    #[test]
    fn rejects_negative_ids_and_garbage() {
        let codec = IdCodec::new(10, ALPHABET).unwrap();
        assert!(matches!(
            codec.encode(-1),
            Err(IdCodecError::NegativeId { value: -1 })
        ));
        assert!(matches!(codec.decode(""), Err(IdCodecError::Undecodable)));
        assert!(matches!(codec.decode("!!"), Err(IdCodecError::Undecodable)));
    }

    #[test]
    fn rejects_oversized_min_length() {
        assert!(matches!(
            IdCodec::new(300, ALPHABET),
            Err(IdCodecError::InvalidMinLength { value: 300 })
        ));
    }
}
