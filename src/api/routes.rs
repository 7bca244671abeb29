/*
 * Responsibility
 * - /api の URL 構造を定義
 * - 認証の要否は route ではなく handler の引数 (AuthCtxExtractor) で決まる
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    courses::{create_course, delete_course, get_course, list_courses, update_course},
    users::{create_user, current_user, list_users},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/current", get(current_user))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{course_id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}
