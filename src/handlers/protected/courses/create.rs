use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::database::models::{ActingUser, CourseInput, CourseView};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/courses - Create a course owned by the caller
///
/// Body: `{ "title": string, "description": string, "price": number }`.
/// Responds 201 with the stored course.
pub async fn post(
    State(state): State<AppState>,
    Extension(actor): Extension<ActingUser>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> ApiResult<CourseView> {
    let Json(input) = payload?;
    let course = state.courses.create_course(&input, &actor).await?;
    Ok(ApiResponse::created(course))
}
