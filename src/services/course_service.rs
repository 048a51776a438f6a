use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::models::{ActingUser, CourseInput, CourseView, Role};
use crate::database::{CourseStore, StorageError};
use super::validation::{validate_course_patch, validate_new_course, ValidationError};

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Course not found: {0}")]
    NotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Course lifecycle rules on top of a `CourseStore`.
///
/// Every operation is an independent unit of work; nothing is retried and
/// every failure is returned to the caller.
#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn CourseStore>,
}

impl CourseService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CourseStore> {
        &self.store
    }

    pub async fn list_courses(&self) -> Result<Vec<CourseView>, CourseError> {
        let courses = self.store.find_all().await?;
        debug!("Listed {} courses", courses.len());
        Ok(courses)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CourseView, CourseError> {
        self.store.find_by_id(id).await?.ok_or(CourseError::NotFound(id))
    }

    pub async fn get_by_title(&self, title: &str) -> Result<Vec<CourseView>, CourseError> {
        Ok(self.store.find_by_title(title).await?)
    }

    pub async fn get_by_instructor(&self, instructor_id: Uuid) -> Result<Vec<CourseView>, CourseError> {
        Ok(self.store.find_by_instructor(instructor_id).await?)
    }

    pub async fn get_by_student(&self, student_id: &str) -> Result<Vec<CourseView>, CourseError> {
        Ok(self.store.find_by_student(student_id).await?)
    }

    /// Create a course owned by `actor`.
    ///
    /// Students are rejected before the body is inspected, so a student gets
    /// `Forbidden` whatever they send.
    pub async fn create_course(&self, input: &CourseInput, actor: &ActingUser) -> Result<CourseView, CourseError> {
        if !can_create(actor.role) {
            warn!("User {} ({}) attempted to create a course", actor.id, actor.role);
            return Err(CourseError::Forbidden(
                "Only instructors can post a new course.".to_string(),
            ));
        }

        let new_course = validate_new_course(input, actor.id)?;
        let course = self.store.create(new_course).await?;

        info!("Course {} created by {}", course.id, actor.id);
        Ok(course)
    }

    /// Append `student_id` to the course's students.
    ///
    /// Duplicates are kept and the enrolling identity's role is not checked.
    pub async fn enroll(&self, course_id: Uuid, student_id: &str) -> Result<CourseView, CourseError> {
        // Existence is checked first so a missing course reports NotFound
        self.get_by_id(course_id).await?;

        let course = self
            .store
            .append_student(course_id, student_id)
            .await?
            .ok_or(CourseError::NotFound(course_id))?;

        info!("Student {} enrolled in course {}", student_id, course_id);
        Ok(course)
    }

    pub async fn update_course(
        &self,
        course_id: Uuid,
        input: &CourseInput,
        actor: &ActingUser,
    ) -> Result<CourseView, CourseError> {
        let patch = validate_course_patch(input)?;

        let course = self.get_by_id(course_id).await?;
        authorize_manage(&course, actor, "edit")?;

        let updated = self
            .store
            .update(course_id, patch)
            .await?
            .ok_or(CourseError::NotFound(course_id))?;

        info!("Course {} updated by {}", course_id, actor.id);
        Ok(updated)
    }

    pub async fn delete_course(&self, course_id: Uuid, actor: &ActingUser) -> Result<(), CourseError> {
        let course = self.get_by_id(course_id).await?;
        authorize_manage(&course, actor, "delete")?;

        if !self.store.delete(course_id).await? {
            return Err(CourseError::NotFound(course_id));
        }

        info!("Course {} deleted by {}", course_id, actor.id);
        Ok(())
    }
}

fn can_create(role: Role) -> bool {
    match role {
        Role::Instructor | Role::Admin => true,
        Role::Student => false,
    }
}

/// Owner or admin
fn can_manage(course: &CourseView, actor: &ActingUser) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Instructor | Role::Student => course.instructor_id() == actor.id,
    }
}

fn authorize_manage(course: &CourseView, actor: &ActingUser, action: &str) -> Result<(), CourseError> {
    if can_manage(course, actor) {
        return Ok(());
    }
    warn!(
        "User {} ({}) denied {} on course {} owned by {}",
        actor.id,
        actor.role,
        action,
        course.id,
        course.instructor_id()
    );
    Err(CourseError::Forbidden(format!(
        "Only the instructor of this course or web admin can {} this course.",
        action
    )))
}
