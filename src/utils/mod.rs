pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod sql;
pub mod validate;

pub use extractor::{SafeCourseIdI64, SafeIDI64, SafeSessionIdI64, SafeStudentIdI64};
pub use parameter_error_handler::{
    json_error_handler, query_error_handler, strict_json_error_handler,
};
pub use sql::escape_like_pattern;
