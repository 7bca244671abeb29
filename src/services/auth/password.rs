use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("salt generation failed: {0}")]
    Salt(String),
    #[error("hashing failed: {0}")]
    Hash(String),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Salted one-way hashing of user secrets (argon2id, PHC strings).
///
/// Hashing and verification are CPU-bound, so both run on the blocking pool.
#[derive(Clone, Debug)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, 1, None).map_err(PasswordError::Params)?;
        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let params = self.params.clone();
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut salt_bytes = [0u8; 16];
            getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;
            let salt =
                SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;

            let phc = Self::argon2(params)
                .hash_password(plaintext.as_bytes(), &salt)
                .map_err(|e| PasswordError::Hash(e.to_string()))?
                .to_string();
            Ok(phc)
        })
        .await?
    }

    /// Constant-time comparison of `plaintext` against a stored digest.
    /// A digest that does not parse never matches.
    pub async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
        let params = self.params.clone();
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();

        let matched = tokio::task::spawn_blocking(move || {
            let Ok(parsed) = PasswordHash::new(&digest) else {
                return false;
            };
            // verification reads cost parameters from the digest itself
            Self::argon2(params)
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .await?;

        Ok(matched)
    }
}
