use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::credentials;
use crate::state::AppState;

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
/// Basic 認証ヘッダを読み、Authenticator に解決させる。request extensions は経由しない
/// 失敗時は 401 (理由は audit log のみ)
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let candidate = credentials::from_headers(&parts.headers);
        let ctx = state.auth.authenticate(candidate).await?;
        Ok(AuthCtxExtractor(ctx))
    }
}
