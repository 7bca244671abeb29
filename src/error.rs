/*
 * Responsibility
 * - アプリ共通の AppError 定義 (Unauthenticated / Forbidden / ValidationFailed / Conflict / NotFound / Internal)
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / AuthError / IdCodecError を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::{AuthError, PasswordError};
use crate::services::id_codec::IdCodecError;

pub const ACCESS_DENIED: &str = "Access Denied";
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

/// Detail of an internal error, attached to the 500 response as an
/// extension. `middleware::error_log` decides whether it gets logged.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden: {message}")]
    Forbidden { message: String },
    #[error("validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
    #[error("conflict: {errors:?}")]
    Conflict { errors: Vec<String> },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("internal server error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn internal(detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::ValidationFailed { .. } | AppError::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    let body = MessageBody {
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Unauthenticated => message(status, ACCESS_DENIED),
            AppError::Forbidden { message: m } => message(status, m),
            AppError::ValidationFailed { errors } | AppError::Conflict { errors } => {
                (status, Json(ErrorsBody { errors })).into_response()
            }
            AppError::NotFound { resource } => message(status, format!("{resource} not found")),
            AppError::Internal { detail } => {
                let mut res = message(status, INTERNAL_MESSAGE);
                res.extensions_mut().insert(InternalErrorDetail(detail));
                res
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict(errors) => AppError::Conflict { errors },
            RepoError::Invalid(errors) => AppError::ValidationFailed { errors },
            RepoError::Db(e) => AppError::internal(format!("database error: {e}")),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            // the reason stays in the audit log, the client only learns "denied"
            AuthError::MissingCredentials
            | AuthError::UserNotFound { .. }
            | AuthError::PasswordMismatch { .. } => AppError::Unauthenticated,
            AuthError::Store(e) => e.into(),
            AuthError::Password(e) => AppError::internal(e),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        AppError::internal(e)
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        // Decode failures are mapped by the public id extractor; anything that
        // reaches here is a server-side config / programming error.
        AppError::internal(e)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, Value, Option<InternalErrorDetail>) {
        let res = err.into_response();
        let status = res.status();
        let detail = res.extensions().get::<InternalErrorDetail>().cloned();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap(), detail)
    }

    #[tokio::test]
    async fn unauthenticated_is_generic_401() {
        let (status, body, _) = body_of(AppError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "Access Denied" }));
    }

    #[tokio::test]
    async fn auth_failure_reasons_are_indistinguishable() {
        let reasons = [
            AuthError::MissingCredentials,
            AuthError::UserNotFound {
                email: "a@b.com".into(),
            },
            AuthError::PasswordMismatch {
                email: "a@b.com".into(),
            },
        ];
        for reason in reasons {
            let (status, body, _) = body_of(reason.into()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({ "message": "Access Denied" }));
        }
    }

    #[tokio::test]
    async fn forbidden_carries_its_message() {
        let (status, body, _) = body_of(AppError::forbidden("not yours")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "message": "not yours" }));
    }

    #[tokio::test]
    async fn validation_and_conflict_list_errors() {
        let (status, body, _) =
            body_of(AppError::validation(vec!["a".into(), "b".into()])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "errors": ["a", "b"] }));

        let conflict = RepoError::Conflict(vec!["E-mail address already in use".into()]);
        let (status, body, _) = body_of(conflict.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "errors": ["E-mail address already in use"] }));
    }

    #[tokio::test]
    async fn not_found_names_resource() {
        let (status, body, _) = body_of(AppError::not_found("Course")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Course not found" }));
    }

    #[tokio::test]
    async fn internal_hides_detail_from_body() {
        let (status, body, detail) = body_of(AppError::internal("pool timed out")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": INTERNAL_MESSAGE }));
        assert_eq!(detail.unwrap().0, "pool timed out");
    }
}
