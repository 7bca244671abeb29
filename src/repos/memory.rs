//! In-process store implementing both `UserStore` and `CourseStore`.
//!
//! A single `RwLock` guards all tables so that uniqueness checks and owner
//! existence checks happen atomically with the write, the same guarantee the
//! database constraints give `PgStore`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::{
    course_repo::{CourseChanges, CourseRow, CourseStore, NewCourse},
    error::{RepoError, RepoResult},
    user_repo::{EMAIL_IN_USE, NewUser, UserRow, UserStore},
};

#[derive(Default)]
struct Tables {
    // insertion order == list order
    users: Vec<UserRow>,
    courses: Vec<CourseRow>,
    next_course_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email_address == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        user.check()?;

        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.email_address == user.email_address)
        {
            return Err(RepoError::Conflict(vec![EMAIL_IN_USE.to_string()]));
        }

        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            password: user.password_digest,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(row.clone());

        Ok(row)
    }

    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        Ok(self.tables.read().await.users.clone())
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CourseRow>> {
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, course: NewCourse) -> RepoResult<CourseRow> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == course.owner_id) {
            return Err(RepoError::Invalid(vec![format!(
                "owner {} does not exist",
                course.owner_id
            )]));
        }

        tables.next_course_id += 1;
        let now = Utc::now();
        let row = CourseRow {
            id: tables.next_course_id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            owner_id: course.owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.courses.push(row.clone());

        Ok(row)
    }

    async fn update(
        &self,
        course: &CourseRow,
        changes: &CourseChanges,
    ) -> RepoResult<Option<CourseRow>> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.courses.iter_mut().find(|c| c.id == course.id) else {
            return Ok(None);
        };

        changes.apply_to(stored);
        stored.updated_at = Utc::now();

        Ok(Some(stored.clone()))
    }

    async fn destroy(&self, course: &CourseRow) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != course.id);
        Ok(tables.courses.len() < before)
    }

    async fn list(&self) -> RepoResult<Vec<CourseRow>> {
        Ok(self.tables.read().await.courses.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Sam".into(),
            last_name: "Jones".into(),
            email_address: email.into(),
            password_digest: "digest".into(),
        }
    }

    fn new_course(owner_id: Uuid) -> NewCourse {
        NewCourse {
            title: "Build a Basic Bookcase".into(),
            description: "High-end furniture projects are great to dream about.".into(),
            estimated_time: None,
            materials_needed: None,
            owner_id,
        }
    }

    #[tokio::test]
    async fn concurrent_duplicate_emails_admit_exactly_one() {
        let store = Arc::new(MemoryStore::new());

        let (a, b) = tokio::join!(
            UserStore::create(store.as_ref(), new_user("sam@jones.com")),
            UserStore::create(store.as_ref(), new_user("sam@jones.com")),
        );

        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let conflict = results.iter().find_map(|r| match r {
            Err(RepoError::Conflict(errors)) => Some(errors.clone()),
            _ => None,
        });
        assert_eq!(conflict, Some(vec![EMAIL_IN_USE.to_string()]));
        assert_eq!(UserStore::list(store.as_ref()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("sam@jones.com"))
            .await
            .unwrap();

        assert!(store.find_by_email("sam@jones.com").await.unwrap().is_some());
        assert!(store.find_by_email("SAM@jones.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_course_requires_existing_owner() {
        let store = MemoryStore::new();
        let err = CourseStore::create(&store, new_course(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Invalid(_)));
    }

    #[tokio::test]
    async fn update_and_destroy_report_missing_rows() {
        let store = MemoryStore::new();
        let owner = UserStore::create(&store, new_user("sam@jones.com"))
            .await
            .unwrap();
        let course = CourseStore::create(&store, new_course(owner.id))
            .await
            .unwrap();
        assert_eq!(course.id, 1);

        assert!(store.destroy(&course).await.unwrap());
        assert!(!store.destroy(&course).await.unwrap());

        let changes = CourseChanges {
            title: "t".into(),
            description: "d".into(),
            estimated_time: None,
            materials_needed: None,
        };
        assert!(store.update(&course, &changes).await.unwrap().is_none());
    }
}
