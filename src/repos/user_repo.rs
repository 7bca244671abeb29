/*
 * Responsibility
 * - users (Identity) の型と UserStore trait の定義
 * - model 制約 (email 形式) の検証: どの store 実装でも同じ規則を通す
 * - password は digest のみ保持し、外へ出す型 (UserProfile) には含めない
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::repos::error::{RepoError, RepoResult};

pub const EMAIL_IN_USE: &str = "E-mail address already in use";
pub const EMAIL_INVALID: &str = "The e-mail is invalid, please re-enter it";

#[derive(Clone, sqlx::FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    #[sqlx(rename = "emailAddress")]
    pub email_address: String,
    // argon2 PHC string, never plaintext
    pub password: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the password digest
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("email_address", &self.email_address)
            .finish_non_exhaustive()
    }
}

/// Identity record minus the secret. This is what leaves the store boundary
/// once authentication is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email_address: row.email_address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_digest: String,
}

impl NewUser {
    /// Model-level constraints checked by every store before insert.
    pub fn check(&self) -> RepoResult<()> {
        if !self.email_address.validate_email() {
            return Err(RepoError::Invalid(vec![EMAIL_INVALID.to_string()]));
        }
        Ok(())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Exact, case-sensitive match on `emailAddress`.
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>>;

    /// Fails with `RepoError::Conflict` when the email is already taken.
    async fn create(&self, user: NewUser) -> RepoResult<UserRow>;

    async fn list(&self) -> RepoResult<Vec<UserRow>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Joe".into(),
            last_name: "Smith".into(),
            email_address: email.into(),
            password_digest: "digest".into(),
        }
    }

    #[test]
    fn check_accepts_valid_email() {
        assert!(new_user("joe@smith.com").check().is_ok());
    }

    #[test]
    fn check_rejects_malformed_email() {
        match new_user("joe-at-smith").check() {
            Err(RepoError::Invalid(errors)) => assert_eq!(errors, vec![EMAIL_INVALID]),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn debug_output_hides_digest() {
        let row = UserRow {
            id: Uuid::new_v4(),
            first_name: "Joe".into(),
            last_name: "Smith".into(),
            email_address: "joe@smith.com".into(),
            password: "$argon2id$secret".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let printed = format!("{row:?}");
        assert!(printed.contains("joe@smith.com"));
        assert!(!printed.contains("argon2id"));
    }
}
