/*
 * Responsibility
 * - Courses の request/response DTO
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 * - "userId" は request からは受け取らない (owner は AuthCtx から決まる)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::dto::double_option;
use crate::repos::course_repo::{CourseChanges, NewCourse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub materials_needed: Option<String>,
}

impl CreateCourseRequest {
    pub const REQUIRED: &'static [&'static str] = &["title", "description"];
    pub const TEXT_FIELDS: &'static [&'static str] =
        &["title", "description", "estimatedTime", "materialsNeeded"];

    pub fn into_new_course(self, owner_id: Uuid) -> NewCourse {
        NewCourse {
            title: self.title,
            description: self.description,
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
            owner_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: String,
    pub description: String,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (set NULL)
    // - Some(Some(v)): set value
    #[serde(default, deserialize_with = "double_option")]
    pub estimated_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub materials_needed: Option<Option<String>>,
}

impl UpdateCourseRequest {
    pub const REQUIRED: &'static [&'static str] = CreateCourseRequest::REQUIRED;
    pub const TEXT_FIELDS: &'static [&'static str] = CreateCourseRequest::TEXT_FIELDS;

    pub fn into_changes(self) -> CourseChanges {
        CourseChanges {
            title: self.title,
            description: self.description,
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String, // encoded
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
