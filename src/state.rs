/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users / courses store, password service, authenticator, id codec
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{CourseStore, UserStore};
use crate::services::{
    auth::{Authenticator, PasswordService},
    id_codec::IdCodec,
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub passwords: PasswordService,
    pub auth: Arc<Authenticator>,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        courses: Arc<dyn CourseStore>,
        passwords: PasswordService,
        auth: Arc<Authenticator>,
        id_codec: IdCodec,
    ) -> Self {
        Self {
            users,
            courses,
            passwords,
            auth,
            id_codec,
        }
    }
}
