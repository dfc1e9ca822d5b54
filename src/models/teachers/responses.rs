use super::entities::Teacher;
use serde::Serialize;
use ts_rs::TS;

// 创建教师响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherCreatedResponse {
    pub teacher: Teacher,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_password: Option<String>,
}
