/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, DATABASE_URL, CORS 許可, password hash cost など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Which collaborator backs the user/course stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND")),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub store_backend: StoreBackend,
    // required only for StoreBackend::Postgres
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub enable_global_error_logging: bool,
    pub request_body_limit_bytes: usize,
    pub request_timeout_seconds: u64,

    pub password_hash_memory_kib: u32,
    pub password_hash_iterations: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(v) => v.parse::<StoreBackend>()?,
            Err(_) => StoreBackend::Postgres,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 5)?;

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let sqids_min_length = std::env::var("SQIDS_MIN_LENGTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        let sqids_alphabet = std::env::var("SQIDS_ALPHABET").unwrap_or_else(|_| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let enable_global_error_logging = std::env::var("ENABLE_GLOBAL_ERROR_LOGGING")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let request_body_limit_bytes = parse_or("REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let request_timeout_seconds = parse_or("REQUEST_TIMEOUT_SECONDS", 30)?;

        // argon2 defaults (OWASP: m=19MiB, t=2, p=1)
        let password_hash_memory_kib = parse_or("PASSWORD_HASH_MEMORY_KIB", 19 * 1024)?;
        let password_hash_iterations = parse_or("PASSWORD_HASH_ITERATIONS", 2)?;

        Ok(Self {
            addr,
            app_env,
            store_backend,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            sqids_min_length,
            sqids_alphabet,
            enable_global_error_logging,
            request_body_limit_bytes,
            request_timeout_seconds,
            password_hash_memory_kib,
            password_hash_iterations,
        })
    }
}

// Absent -> default, present but unparsable -> startup failure.
fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_known_names() {
        assert_eq!(
            "postgres".parse::<StoreBackend>().unwrap(),
            StoreBackend::Postgres
        );
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn config_error_names_the_key() {
        assert_eq!(
            ConfigError::Missing("DATABASE_URL").to_string(),
            "missing configuration: DATABASE_URL"
        );
        assert_eq!(
            ConfigError::Invalid("PORT").to_string(),
            "invalid configuration: PORT"
        );
    }
}
