/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - store 固有のエラー (sqlx::Error など) はここで翻訳し、handler には漏らさない
 */
use thiserror::Error;

/// SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    /// Uniqueness constraint rejected the write. Carries per-field messages.
    #[error("conflict: {0:?}")]
    Conflict(Vec<String>),
    /// Model validation rejected the record before it reached the table.
    #[error("invalid record: {0:?}")]
    Invalid(Vec<String>),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Translate a sqlx error, mapping unique violations to `Conflict(on_unique)`.
    pub fn from_sqlx(e: sqlx::Error, on_unique: &str) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some(PG_UNIQUE_VIOLATION)
        {
            return RepoError::Conflict(vec![on_unique.to_string()]);
        }
        RepoError::Db(e)
    }
}
