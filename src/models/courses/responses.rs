use super::entities::Course;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

// 选课结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct EnrollStudentsResponse {
    pub enrolled: i64,
    pub already_enrolled: i64,
}
