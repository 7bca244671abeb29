use std::sync::Arc;

use thiserror::Error;

use crate::repos::{UserStore, error::RepoError};
use crate::services::auth::{
    context::AuthCtx,
    credentials::Credentials,
    password::{PasswordError, PasswordService},
};

/// Why authentication failed. The reason is for the audit log only; every
/// variant except the backend ones collapses to the same 401 for the client.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header not found")]
    MissingCredentials,
    #[error("user not found: {email}")]
    UserNotFound { email: String },
    #[error("password mismatch for username: {email}")]
    PasswordMismatch { email: String },

    #[error("user store failure")]
    Store(#[from] RepoError),
    #[error("password verification failure")]
    Password(#[from] PasswordError),
}

/// Resolves Basic credentials against the user store.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("passwords", &self.passwords)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>, passwords: PasswordService) -> Self {
        Self { users, passwords }
    }

    pub async fn authenticate(&self, credentials: Option<Credentials>) -> Result<AuthCtx, AuthError> {
        let result = self.resolve(credentials).await;

        match &result {
            Ok(ctx) => {
                tracing::info!(email = %ctx.user.email_address, "authentication successful");
            }
            Err(err @ (AuthError::Store(_) | AuthError::Password(_))) => {
                tracing::error!(error = ?err, "authentication backend failure");
            }
            Err(err) => {
                tracing::warn!(reason = %err, "authentication failed");
            }
        }

        result
    }

    async fn resolve(&self, credentials: Option<Credentials>) -> Result<AuthCtx, AuthError> {
        let Credentials { name, secret } = credentials.ok_or(AuthError::MissingCredentials)?;

        let Some(user) = self.users.find_by_email(&name).await? else {
            return Err(AuthError::UserNotFound { email: name });
        };

        if !self.passwords.verify(&secret, &user.password).await? {
            return Err(AuthError::PasswordMismatch {
                email: user.email_address,
            });
        }

        Ok(AuthCtx::new(user.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{
        memory::MemoryStore,
        user_repo::{NewUser, UserProfile},
    };

    async fn setup() -> (Authenticator, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let passwords = PasswordService::new(argon2::Params::MIN_M_COST, 1).unwrap();
        let digest = passwords.hash("joepassword").await.unwrap();
        UserStore::create(
            store.as_ref(),
            NewUser {
                first_name: "Joe".into(),
                last_name: "Smith".into(),
                email_address: "joe@smith.com".into(),
                password_digest: digest,
            },
        )
        .await
        .unwrap();

        (Authenticator::new(store.clone(), passwords), store)
    }

    fn creds(name: &str, secret: &str) -> Option<Credentials> {
        Some(Credentials {
            name: name.into(),
            secret: secret.into(),
        })
    }

    #[tokio::test]
    async fn no_credentials_fails() {
        let (auth, _) = setup().await;
        assert!(matches!(
            auth.authenticate(None).await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn unknown_user_fails() {
        let (auth, _) = setup().await;
        let err = auth
            .authenticate(creds("nobody@smith.com", "joepassword"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound { email } if email == "nobody@smith.com"));
    }

    #[tokio::test]
    async fn wrong_secret_fails() {
        let (auth, _) = setup().await;
        let err = auth
            .authenticate(creds("joe@smith.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch { .. }));
    }

    #[tokio::test]
    async fn valid_credentials_resolve_the_stored_identity() {
        let (auth, store) = setup().await;
        let ctx = auth
            .authenticate(creds("joe@smith.com", "joepassword"))
            .await
            .unwrap();

        let stored = store.find_by_email("joe@smith.com").await.unwrap().unwrap();
        assert_eq!(ctx.user_id, stored.id);
        assert_eq!(ctx.user, UserProfile::from(stored));
    }
}
