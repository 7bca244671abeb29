/*
 * Responsibility
 * - handler が受け取る extractor 群 (認証コンテキスト, 公開 ID, payload)
 */
pub mod auth_ctx;
pub mod payload;
pub mod public_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use payload::Payload;
pub use public_id::PublicCourseId;
