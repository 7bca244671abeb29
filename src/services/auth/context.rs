/*
 * Responsibility
 * - 認証済みコンテキストの型 (Authenticator の出力)
 * - handler は extractor 経由で受け取り、ownership guard / mutation へ明示的に渡す
 * - request の間だけ生き、永続化しない
 */
use uuid::Uuid;

use crate::repos::user_repo::UserProfile;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は内部ユーザーID (users."userId")
/// - `user` は store から引いた Identity (password digest は含まない)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub user: UserProfile,
}

impl AuthCtx {
    pub fn new(user: UserProfile) -> Self {
        Self {
            user_id: user.id,
            user,
        }
    }
}
