/// Factory: build the password service and `Authenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::UserStore;
use crate::services::auth::{Authenticator, PasswordError, PasswordService};

pub fn build_password_service(config: &Config) -> Result<PasswordService, PasswordError> {
    PasswordService::new(
        config.password_hash_memory_kib,
        config.password_hash_iterations,
    )
}

pub fn build_authenticator(
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
) -> Arc<Authenticator> {
    Arc::new(Authenticator::new(users, passwords))
}
