//! Ownership guard for operations on an existing course.
//!
//! The course must already be loaded; a missing course is a 404 decided by
//! the caller before this guard runs.

use crate::services::auth::AuthCtx;
use crate::error::AppError;
use crate::repos::course_repo::CourseRow;

pub fn ensure_owner(ctx: &AuthCtx, course: &CourseRow) -> Result<(), AppError> {
    if course.owner_id == ctx.user_id {
        return Ok(());
    }

    tracing::warn!(
        email = %ctx.user.email_address,
        course_id = course.id,
        "ownership check failed"
    );
    Err(AppError::forbidden(
        "Access denied: you are not the owner of this course",
    ))
}
