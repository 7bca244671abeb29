/*
 * Responsibility
 * - Path の String を公開 ID として受け、復号して内部 ID へ変換する
 * - 復号できない ID はどのリソースも指さないので 404 (NotFound) にする
 */
use std::marker::PhantomData;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Resource tag for `PublicId<T>`; `NAME` is used in 404 bodies.
pub trait PublicResource {
    const NAME: &'static str;
}

#[derive(Clone, Copy)]
pub struct PublicId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PublicId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> FromRequestParts<AppState> for PublicId<T>
where
    T: PublicResource + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(public_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::NAME))?;
        let id = state
            .id_codec
            .decode(&public_id)
            .map_err(|_| AppError::not_found(T::NAME))?;
        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicId").field("id", &self.id).finish()
    }
}
