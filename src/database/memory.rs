use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::StorageError;
use super::models::{Course, CoursePatch, CourseView, InstructorSummary, NewCourse, User};
use super::store::CourseStore;

/// Process-local course store used by tests and the `memory` backend.
///
/// Courses are kept in insertion order. Instructor references resolve
/// against users registered through `register_user`.
#[derive(Default)]
pub struct MemoryCourseStore {
    courses: RwLock<Vec<Course>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a user visible to the instructor join
    pub async fn register_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    async fn view(&self, course: &Course) -> CourseView {
        let users = self.users.read().await;
        let instructor = users
            .get(&course.instructor)
            .map(InstructorSummary::from)
            .unwrap_or_else(|| InstructorSummary::unresolved(course.instructor));
        CourseView::new(course.clone(), instructor)
    }

    async fn select<F>(&self, predicate: F) -> Vec<CourseView>
    where
        F: Fn(&Course) -> bool,
    {
        let matching: Vec<Course> = self
            .courses
            .read()
            .await
            .iter()
            .filter(|c| predicate(c))
            .cloned()
            .collect();

        let mut views = Vec::with_capacity(matching.len());
        for course in &matching {
            views.push(self.view(course).await);
        }
        views
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn find_all(&self) -> Result<Vec<CourseView>, StorageError> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseView>, StorageError> {
        Ok(self.select(|c| c.id == id).await.into_iter().next())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<CourseView>, StorageError> {
        Ok(self.select(|c| c.title == title).await)
    }

    async fn find_by_instructor(&self, instructor_id: Uuid) -> Result<Vec<CourseView>, StorageError> {
        Ok(self.select(|c| c.instructor == instructor_id).await)
    }

    async fn find_by_student(&self, student_id: &str) -> Result<Vec<CourseView>, StorageError> {
        Ok(self.select(|c| c.students.iter().any(|s| s == student_id)).await)
    }

    async fn create(&self, course: NewCourse) -> Result<CourseView, StorageError> {
        let record = Course {
            id: Uuid::new_v4(),
            title: course.title,
            description: course.description,
            price: course.price,
            instructor: course.instructor,
            students: Vec::new(),
        };
        self.courses.write().await.push(record.clone());
        Ok(self.view(&record).await)
    }

    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Option<CourseView>, StorageError> {
        let updated = {
            let mut courses = self.courses.write().await;
            match courses.iter_mut().find(|c| c.id == id) {
                Some(course) => {
                    patch.apply_to(course);
                    Some(course.clone())
                }
                None => None,
            }
        };

        match updated {
            Some(course) => Ok(Some(self.view(&course).await)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        Ok(courses.len() != before)
    }

    async fn append_student(&self, id: Uuid, student_id: &str) -> Result<Option<CourseView>, StorageError> {
        // Read-modify-write happens under one write guard
        let updated = {
            let mut courses = self.courses.write().await;
            courses.iter_mut().find(|c| c.id == id).map(|course| {
                course.students.push(student_id.to_string());
                course.clone()
            })
        };

        match updated {
            Some(course) => Ok(Some(self.view(&course).await)),
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
