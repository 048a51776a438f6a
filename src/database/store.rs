use async_trait::async_trait;
use uuid::Uuid;

use super::error::StorageError;
use super::models::{CoursePatch, CourseView, NewCourse};

/// Storage abstraction over course records.
///
/// Implementations neither validate nor authorize; a missing record is
/// reported as `None` (or `false` for `delete`), never as an error.
/// List reads return courses in creation order.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<CourseView>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseView>, StorageError>;

    /// Exact title match
    async fn find_by_title(&self, title: &str) -> Result<Vec<CourseView>, StorageError>;

    async fn find_by_instructor(&self, instructor_id: Uuid) -> Result<Vec<CourseView>, StorageError>;

    /// Courses whose student list contains `student_id`
    async fn find_by_student(&self, student_id: &str) -> Result<Vec<CourseView>, StorageError>;

    async fn create(&self, course: NewCourse) -> Result<CourseView, StorageError>;

    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Option<CourseView>, StorageError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError>;

    /// Append without de-duplication
    async fn append_student(&self, id: Uuid, student_id: &str) -> Result<Option<CourseView>, StorageError>;

    /// Round-trip used by the health endpoint
    async fn ping(&self) -> Result<(), StorageError>;

    /// Release underlying resources at shutdown
    async fn close(&self) {}
}
