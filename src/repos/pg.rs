/*
 * Responsibility
 * - users / courses テーブル向け SQLx 操作 (PgPool を保持)
 * - 起動時の schema sync (CREATE TABLE IF NOT EXISTS). migration ではない
 * - DB エラーは RepoError::from_sqlx で意味付けしてから返す
 */
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

use crate::repos::{
    course_repo::{CourseChanges, CourseRow, CourseStore, NewCourse},
    error::{RepoError, RepoResult},
    user_repo::{EMAIL_IN_USE, NewUser, UserRow, UserStore},
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        "userId" UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        "firstName" TEXT NOT NULL,
        "lastName" TEXT NOT NULL,
        "emailAddress" TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        "createdAt" TIMESTAMPTZ NOT NULL DEFAULT now(),
        "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        "estimatedTime" TEXT,
        "materialsNeeded" TEXT,
        "userId" UUID NOT NULL REFERENCES users ("userId") ON DELETE CASCADE,
        "createdAt" TIMESTAMPTZ NOT NULL DEFAULT now(),
        "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

const USER_COLUMNS: &str =
    r#""userId", "firstName", "lastName", "emailAddress", password, "createdAt", "updatedAt""#;

const COURSE_COLUMNS: &str = r#"id, title, description, "estimatedTime", "materialsNeeded", "userId", "createdAt", "updatedAt""#;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Create missing tables. Existing tables are left untouched.
    pub async fn sync(&self) -> RepoResult<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE "emailAddress" = $1"#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE "userId" = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        user.check()?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users ("firstName", "lastName", "emailAddress", password)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email_address)
        .bind(&user.password_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, EMAIL_IN_USE))?;

        Ok(row)
    }

    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users ORDER BY "createdAt" ASC"#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<CourseRow>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, course: NewCourse) -> RepoResult<CourseRow> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            INSERT INTO courses (title, description, "estimatedTime", "materialsNeeded", "userId")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.estimated_time)
        .bind(&course.materials_needed)
        .bind(course.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        course: &CourseRow,
        changes: &CourseChanges,
    ) -> RepoResult<Option<CourseRow>> {
        // $4/$6: flags telling whether the optional column is being set at all
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            UPDATE courses
            SET
                title = $2,
                description = $3,
                "estimatedTime" = CASE WHEN $4 THEN $5 ELSE "estimatedTime" END,
                "materialsNeeded" = CASE WHEN $6 THEN $7 ELSE "materialsNeeded" END,
                "updatedAt" = now()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(course.id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.estimated_time.is_some())
        .bind(changes.estimated_time.clone().flatten())
        .bind(changes.materials_needed.is_some())
        .bind(changes.materials_needed.clone().flatten())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn destroy(&self, course: &CourseRow) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> RepoResult<Vec<CourseRow>> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            r#"SELECT {COURSE_COLUMNS} FROM courses ORDER BY id ASC"#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
