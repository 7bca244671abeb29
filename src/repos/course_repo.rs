/*
 * Responsibility
 * - courses (Resource) の型と CourseStore trait の定義
 * - "userId" は作成時に必ず与えられ、以後どの操作でも変わらない
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
    #[sqlx(rename = "materialsNeeded")]
    pub materials_needed: Option<String>,
    #[sqlx(rename = "userId")]
    pub owner_id: Uuid,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub owner_id: Uuid,
}

/// Field changes applied by `CourseStore::update`.
///
/// `title`/`description` are always replaced. The optional columns are
/// tri-state:
/// - `None`: keep the stored value
/// - `Some(None)`: set NULL
/// - `Some(Some(v))`: set v
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
}

#[async_trait]
pub trait CourseStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CourseRow>>;

    async fn create(&self, course: NewCourse) -> RepoResult<CourseRow>;

    /// Returns `None` when the course vanished between load and write.
    async fn update(
        &self,
        course: &CourseRow,
        changes: &CourseChanges,
    ) -> RepoResult<Option<CourseRow>>;

    /// Returns `false` when the course was already gone.
    async fn destroy(&self, course: &CourseRow) -> RepoResult<bool>;

    async fn list(&self) -> RepoResult<Vec<CourseRow>>;
}

impl CourseChanges {
    /// Apply the changes to an in-memory copy of the row.
    pub fn apply_to(&self, row: &mut CourseRow) {
        row.title = self.title.clone();
        row.description = self.description.clone();
        if let Some(v) = &self.estimated_time {
            row.estimated_time = v.clone();
        }
        if let Some(v) = &self.materials_needed {
            row.materials_needed = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CourseRow {
        CourseRow {
            id: 1,
            title: "Old".into(),
            description: "Old desc".into(),
            estimated_time: Some("2 hours".into()),
            materials_needed: Some("Glue".into()),
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn apply_to_handles_tri_state_columns() {
        let mut course = row();
        let owner = course.owner_id;
        CourseChanges {
            title: "New".into(),
            description: "New desc".into(),
            estimated_time: None,
            materials_needed: Some(None),
        }
        .apply_to(&mut course);

        assert_eq!(course.title, "New");
        assert_eq!(course.description, "New desc");
        assert_eq!(course.estimated_time.as_deref(), Some("2 hours"));
        assert_eq!(course.materials_needed, None);
        assert_eq!(course.owner_id, owner);
    }
}
