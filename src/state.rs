use std::sync::Arc;

use crate::database::CourseStore;
use crate::services::CourseService;

/// Shared handler state; cloned per request
#[derive(Clone)]
pub struct AppState {
    pub courses: CourseService,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            courses: CourseService::new(store),
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn CourseStore> {
        self.courses.store()
    }
}
