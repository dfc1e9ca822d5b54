use super::entities::{Subject, TimeSlot};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub school_year: Option<String>,
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub include_inactive: bool,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub school_year: Option<String>,
    pub teacher_id: Option<i64>,
    pub include_inactive: bool,
}

// 课节输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct SessionInput {
    pub subject: Subject,
    pub level: String,
    pub time_slot: TimeSlot,
    pub start_time: String,
    pub end_time: String,
    pub classroom_number: Option<String>,
}

// 创建课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseRequest {
    /// 为空时使用配置中的默认学年
    pub school_year: Option<String>,
    pub teacher_ids: Vec<i64>,
    pub sessions: Vec<SessionInput>,
}

// 更新课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct UpdateCourseRequest {
    pub school_year: Option<String>,
    /// 提供时整体替换教师列表
    pub teacher_ids: Option<Vec<i64>>,
    pub is_active: Option<bool>,
}

// 更新课节请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct UpdateSessionRequest {
    pub subject: Option<Subject>,
    pub level: Option<String>,
    pub time_slot: Option<TimeSlot>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub classroom_number: Option<String>,
}

// 学生选课请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct EnrollStudentsRequest {
    pub student_ids: Vec<i64>,
}
