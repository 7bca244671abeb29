/*
 * Responsibility
 * - /courses 系 CRUD handler
 * - 読み取り (GET) は公開。変更系は
 *   認証 -> (既存リソースなら) 存在確認 -> ownership -> field validation -> mutation
 *   の順に通し、どこかで失敗したら以降は実行しない
 * - Path の id は公開 ID → extractor で内部 ID に変換して受け取る
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::{
        dto::{
            self,
            courses::{CourseResponse, CreateCourseRequest, UpdateCourseRequest},
        },
        extractors::{AuthCtxExtractor, Payload, PublicCourseId},
    },
    error::AppError,
    repos::course_repo::CourseRow,
    services::{ownership, validation},
    state::AppState,
};

const COURSE: &str = "Course";

fn row_to_response(state: &AppState, row: CourseRow) -> Result<CourseResponse, AppError> {
    let public_id = state.id_codec.encode(row.id)?;

    Ok(CourseResponse {
        id: public_id,
        title: row.title,
        description: row.description,
        estimated_time: row.estimated_time,
        materials_needed: row.materials_needed,
        user_id: row.owner_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

async fn load_course(state: &AppState, id: i64) -> Result<CourseRow, AppError> {
    state
        .courses
        .find_by_id(id)
        .await?
        .ok_or(AppError::not_found(COURSE))
}

pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let rows = state.courses.list().await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn get_course(
    State(state): State<AppState>,
    course_id: PublicCourseId,
) -> Result<Json<CourseResponse>, AppError> {
    let row = load_course(&state, course_id.id).await?;
    Ok(Json(row_to_response(&state, row)?))
}

pub async fn create_course(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Payload,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    validation::require(&fields, CreateCourseRequest::REQUIRED)?;
    let req: CreateCourseRequest = dto::from_fields(fields, CreateCourseRequest::TEXT_FIELDS)?;

    let row = state.courses.create(req.into_new_course(ctx.user_id)).await?;
    let public_id = state.id_codec.encode(row.id)?;

    tracing::info!(course_id = row.id, owner = %ctx.user.email_address, "course created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{public_id}"))],
    ))
}

pub async fn update_course(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    course_id: PublicCourseId,
    payload: Payload,
) -> Result<StatusCode, AppError> {
    let course = load_course(&state, course_id.id).await?;
    ownership::ensure_owner(&ctx, &course)?;

    let fields = payload.into_fields()?;
    validation::require(&fields, UpdateCourseRequest::REQUIRED)?;
    let req: UpdateCourseRequest = dto::from_fields(fields, UpdateCourseRequest::TEXT_FIELDS)?;

    state
        .courses
        .update(&course, &req.into_changes())
        .await?
        .ok_or(AppError::not_found(COURSE))?;

    tracing::info!(course_id = course.id, owner = %ctx.user.email_address, "course updated");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_course(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    course_id: PublicCourseId,
) -> Result<StatusCode, AppError> {
    let course = load_course(&state, course_id.id).await?;
    ownership::ensure_owner(&ctx, &course)?;

    if !state.courses.destroy(&course).await? {
        return Err(AppError::not_found(COURSE));
    }

    tracing::info!(course_id = course.id, owner = %ctx.user.email_address, "course deleted");

    Ok(StatusCode::NO_CONTENT)
}
