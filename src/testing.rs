//! Shared fixtures for unit and HTTP tests: in-memory store, cheap argon2
//! parameters, and a `TestServer` wrapping the real router.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::app::build_router;
use crate::config::{AppEnv, Config, StoreBackend};
use crate::repos::{
    CourseStore, UserStore,
    memory::MemoryStore,
    user_repo::{NewUser, UserRow},
};
use crate::services::{
    auth::{self, PasswordService},
    id_codec::IdCodec,
};
use crate::state::AppState;

pub fn config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        store_backend: StoreBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        cors_allowed_origins: Vec::new(),
        sqids_min_length: 10,
        sqids_alphabet: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
            .to_string(),
        enable_global_error_logging: true,
        request_body_limit_bytes: 1024 * 1024,
        request_timeout_seconds: 30,
        password_hash_memory_kib: argon2::Params::MIN_M_COST,
        password_hash_iterations: 1,
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub fn state(store: Arc<MemoryStore>, config: &Config) -> AppState {
    let users: Arc<dyn UserStore> = store.clone();
    let courses: Arc<dyn CourseStore> = store;
    let passwords = auth::build_password_service(config).unwrap();
    let authenticator = auth::build_authenticator(users.clone(), passwords.clone());
    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet).unwrap();
    AppState::new(users, courses, passwords, authenticator, id_codec)
}

pub fn app() -> TestApp {
    let config = config();
    let store = Arc::new(MemoryStore::new());
    let state = state(store.clone(), &config);
    let server = TestServer::new(build_router(state.clone(), &config));

    TestApp {
        server,
        store,
        state,
    }
}

pub fn basic(name: &str, secret: &str) -> HeaderValue {
    let encoded = STANDARD.encode(format!("{name}:{secret}"));
    HeaderValue::from_str(&format!("Basic {encoded}")).unwrap()
}

impl TestApp {
    /// Insert a user directly through the store, bypassing HTTP.
    pub async fn seed_user(&self, first_name: &str, email: &str, password: &str) -> UserRow {
        let passwords: &PasswordService = &self.state.passwords;
        let password_digest = passwords.hash(password).await.unwrap();
        UserStore::create(
            self.store.as_ref(),
            NewUser {
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                email_address: email.to_string(),
                password_digest,
            },
        )
        .await
        .unwrap()
    }

    pub async fn course_count(&self) -> usize {
        CourseStore::list(self.store.as_ref()).await.unwrap().len()
    }

    pub async fn user_count(&self) -> usize {
        UserStore::list(self.store.as_ref()).await.unwrap().len()
    }
}
