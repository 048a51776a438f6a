pub mod course_service;
pub mod validation;

pub use course_service::{CourseError, CourseService};
pub use validation::ValidationError;
