pub mod create;
pub mod enroll;
pub mod find;
pub mod record;
pub mod utils;

// Re-export handler functions for use in routing
pub use create::post as course_create;
pub use enroll::post as course_enroll;
pub use find::by_instructor as courses_by_instructor;
pub use find::by_name as courses_by_name;
pub use find::by_student as courses_by_student;
pub use find::list as courses_list;
pub use record::delete as course_delete;
pub use record::get as course_get;
pub use record::patch as course_patch;
