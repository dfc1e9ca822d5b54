//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod attendance_records;
pub mod attendances;
pub mod behavior_records;
pub mod behaviors;
pub mod course_session_students;
pub mod course_sessions;
pub mod course_teachers;
pub mod courses;
pub mod grade_records;
pub mod grades;
pub mod holidays;
pub mod messages;
pub mod schedules;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};

/// 数据库中日期统一存为 YYYY-MM-DD
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn to_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap_or_default()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
