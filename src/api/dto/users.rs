/*
 * Responsibility
 * - Users の request/response DTO
 * - response には password (digest) を絶対に含めない
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::user_repo::UserProfile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl CreateUserRequest {
    /// Checked in this order; messages come back in the same order.
    pub const REQUIRED: &'static [&'static str] =
        &["firstName", "lastName", "emailAddress", "password"];
    pub const TEXT_FIELDS: &'static [&'static str] = Self::REQUIRED;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(u: UserProfile) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email_address: u.email_address,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
