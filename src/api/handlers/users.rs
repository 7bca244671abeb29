/*
 * Responsibility
 * - /users 系 handler
 * - POST /users: field validation -> hash -> create (認証なし, ownership なし)
 * - GET /users/current: AuthCtx をそのまま返す
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::{
        dto::{
            self,
            users::{CreateUserRequest, UserResponse},
        },
        extractors::{AuthCtxExtractor, Payload},
    },
    error::AppError,
    repos::user_repo::{NewUser, UserProfile},
    services::validation,
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = state.users.list().await?;
    let res = rows
        .into_iter()
        .map(|row| UserResponse::from(UserProfile::from(row)))
        .collect();

    Ok(Json(res))
}

pub async fn current_user(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<UserResponse> {
    Json(ctx.user.into())
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    validation::require(&fields, CreateUserRequest::REQUIRED)?;
    let req: CreateUserRequest = dto::from_fields(fields, CreateUserRequest::TEXT_FIELDS)?;

    let password_digest = state.passwords.hash(&req.password).await?;
    let row = state
        .users
        .create(NewUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email_address: req.email_address,
            password_digest,
        })
        .await?;

    tracing::info!(user_id = %row.id, email = %row.email_address, "user created");

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
