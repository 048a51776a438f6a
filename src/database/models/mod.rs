pub mod course;
pub mod user;

pub use course::{Course, CourseInput, CoursePatch, CourseView, NewCourse};
pub use user::{ActingUser, InstructorSummary, Role, User};
