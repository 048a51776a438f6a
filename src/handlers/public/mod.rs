use axum::{extract::State, http::StatusCode, response::{IntoResponse, Json}};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - Service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Course API",
            "version": version,
            "description": "Course catalogue, enrollment and instructor management",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "courses": "/api/courses[/:id] (protected)",
                "lookups": "/api/courses/instructor/:id, /api/courses/findByName/:name, /api/courses/student/:id (protected)",
                "enroll": "/api/courses/enroll/:id (protected)",
            }
        }
    }))
}

/// GET /health - Store round-trip
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unavailable"
                    }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{CoursePatch, CourseView, NewCourse};
    use crate::database::{CourseStore, StorageError};
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use std::sync::Arc;
    use uuid::Uuid;

    const DETAIL: &str = "connection refused to db.internal:5432";

    struct DownStore;

    fn down<T>() -> Result<T, StorageError> {
        Err(StorageError::ConnectionError(DETAIL.to_string()))
    }

    #[async_trait]
    impl CourseStore for DownStore {
        async fn find_all(&self) -> Result<Vec<CourseView>, StorageError> {
            down()
        }
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<CourseView>, StorageError> {
            down()
        }
        async fn find_by_title(&self, _title: &str) -> Result<Vec<CourseView>, StorageError> {
            down()
        }
        async fn find_by_instructor(&self, _id: Uuid) -> Result<Vec<CourseView>, StorageError> {
            down()
        }
        async fn find_by_student(&self, _id: &str) -> Result<Vec<CourseView>, StorageError> {
            down()
        }
        async fn create(&self, _course: NewCourse) -> Result<CourseView, StorageError> {
            down()
        }
        async fn update(&self, _id: Uuid, _patch: CoursePatch) -> Result<Option<CourseView>, StorageError> {
            down()
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, StorageError> {
            down()
        }
        async fn append_student(&self, _id: Uuid, _student: &str) -> Result<Option<CourseView>, StorageError> {
            down()
        }
        async fn ping(&self) -> Result<(), StorageError> {
            down()
        }
    }

    #[tokio::test]
    async fn health_hides_storage_details() {
        let state = AppState::new(Arc::new(DownStore), "secret");
        let response = health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains(DETAIL), "leaked: {}", text);

        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["data"]["database"], "unavailable");
    }
}
