use axum::extract::{Path, State};

use crate::database::models::CourseView;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::parse_user_id;

/// GET /api/courses - All courses with instructor contact details
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CourseView>> {
    let courses = state.courses.list_courses().await?;
    Ok(ApiResponse::success(courses))
}

/// GET /api/courses/instructor/:instructor_id
pub async fn by_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<String>,
) -> ApiResult<Vec<CourseView>> {
    let instructor_id = parse_user_id(&instructor_id)?;
    let courses = state.courses.get_by_instructor(instructor_id).await?;
    Ok(ApiResponse::success(courses))
}

/// GET /api/courses/findByName/:name - Exact title match
pub async fn by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Vec<CourseView>> {
    let courses = state.courses.get_by_title(&name).await?;
    Ok(ApiResponse::success(courses))
}

/// GET /api/courses/student/:student_id - Courses the student is enrolled in
pub async fn by_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> ApiResult<Vec<CourseView>> {
    let courses = state.courses.get_by_student(&student_id).await?;
    Ok(ApiResponse::success(courses))
}
