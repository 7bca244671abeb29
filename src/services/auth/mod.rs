pub mod authenticator;
pub mod context;
pub mod credentials;
pub mod factory;
pub mod password;

pub use authenticator::{AuthError, Authenticator};
pub use context::AuthCtx;
pub use factory::{build_authenticator, build_password_service};
pub use password::{PasswordError, PasswordService};
