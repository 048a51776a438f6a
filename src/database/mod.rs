pub mod error;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use error::StorageError;
pub use manager::DatabaseManager;
pub use memory::MemoryCourseStore;
pub use postgres::PgCourseStore;
pub use store::CourseStore;
