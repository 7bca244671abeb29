/*
 * Responsibility
 * - GET /health (疎通用)
 * - GET / (welcome), 未定義ルートの 404
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn welcome() -> impl IntoResponse {
    Json(json!({"message": "Welcome to the REST API project!"}))
}

pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Route Not Found"})),
    )
}
