/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → store / service 生成 → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / error log)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{
    self,
    handlers::health::{health, route_not_found, welcome},
};
use crate::config::{Config, ConfigError, StoreBackend};
use crate::middleware;
use crate::repos::{CourseStore, UserStore, memory::MemoryStore, pg::PgStore};
use crate::services::{auth, id_codec::IdCodec};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,courses_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} ({:?} store)",
        config.app_env,
        config.addr,
        config.store_backend
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_stores(config: &Config) -> Result<(Arc<dyn UserStore>, Arc<dyn CourseStore>)> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;

            let store = match PgStore::connect(url, config.database_max_connections).await {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!(error = ?err, "connection to the database failed");
                    return Err(err.into());
                }
            };
            store.sync().await?;
            tracing::info!("connection to the database was successful");

            let store = Arc::new(store);
            let users: Arc<dyn UserStore> = store.clone();
            let courses: Arc<dyn CourseStore> = store;
            Ok((users, courses))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let users: Arc<dyn UserStore> = store.clone();
            let courses: Arc<dyn CourseStore> = store;
            Ok((users, courses))
        }
    }
}

async fn build_state(config: &Config) -> Result<AppState> {
    // Build process-level services here and inject them into the shared application state.
    let (users, courses) = build_stores(config).await?;
    let passwords = auth::build_password_service(config)?;
    let authenticator = auth::build_authenticator(users.clone(), passwords.clone());
    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    Ok(AppState::new(
        users,
        courses,
        passwords,
        authenticator,
        id_codec,
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .nest("/api", api::routes())
        .fallback(route_not_found)
        .with_state(state);

    let router = middleware::error_log::apply(router, config.enable_global_error_logging);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
