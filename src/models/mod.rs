pub mod attendances;
pub mod auth;
pub mod behaviors;
pub mod common;
pub mod courses;
pub mod grades;
pub mod holidays;
pub mod messages;
pub mod schedules;
pub mod stats;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PaginationInfo, PaginationQuery};
