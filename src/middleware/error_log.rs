//! Global error logging.
//!
//! `AppError::Internal` attaches its detail to the 500 response as an
//! `InternalErrorDetail` extension. This layer strips it and, when
//! `ENABLE_GLOBAL_ERROR_LOGGING=true`, logs it with the request line.

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use crate::error::InternalErrorDetail;

pub fn apply(router: Router, enabled: bool) -> Router {
    router.layer(middleware::from_fn_with_state(enabled, log_internal_errors))
}

async fn log_internal_errors(State(enabled): State<bool>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let mut res = next.run(req).await;

    if let Some(InternalErrorDetail(detail)) = res.extensions_mut().remove::<InternalErrorDetail>()
        && enabled
    {
        tracing::error!(%method, %uri, status = %res.status(), error = %detail, "global error handler");
    }

    res
}
