use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{ActingUser, CourseInput, CourseView};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::parse_course_id;

#[derive(Debug, Serialize)]
pub struct DeleteReceipt {
    pub id: Uuid,
    pub message: &'static str,
}

/// GET /api/courses/:id - Get a single course by id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<CourseView> {
    let course_id = parse_course_id(&id)?;
    let course = state.courses.get_by_id(course_id).await?;
    Ok(ApiResponse::success(course))
}

/// PATCH /api/courses/:id - Partially update a course (owner or admin)
pub async fn patch(
    State(state): State<AppState>,
    Extension(actor): Extension<ActingUser>,
    Path(id): Path<String>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> ApiResult<CourseView> {
    let course_id = parse_course_id(&id)?;
    let Json(input) = payload?;
    let course = state.courses.update_course(course_id, &input, &actor).await?;
    Ok(ApiResponse::success(course))
}

/// DELETE /api/courses/:id - Remove a course (owner or admin)
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<ActingUser>,
    Path(id): Path<String>,
) -> ApiResult<DeleteReceipt> {
    let course_id = parse_course_id(&id)?;
    state.courses.delete_course(course_id, &actor).await?;
    Ok(ApiResponse::success(DeleteReceipt {
        id: course_id,
        message: "Course deleted",
    }))
}
