use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::models::CourseView;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::parse_course_id;

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentReceipt {
    pub message: &'static str,
    pub course: CourseView,
}

/// POST /api/courses/enroll/:id - Append `user_id` to the course's students
pub async fn post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EnrollRequest>, JsonRejection>,
) -> ApiResult<EnrollmentReceipt> {
    let course_id = parse_course_id(&id)?;
    let Json(request) = payload?;

    let course = state.courses.enroll(course_id, &request.user_id).await?;
    Ok(ApiResponse::success(EnrollmentReceipt {
        message: "Done Enrollment.",
        course,
    }))
}
