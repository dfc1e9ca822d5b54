use super::entities::Student;
use serde::Serialize;
use ts_rs::TS;

// 创建学生响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentCreatedResponse {
    pub student: Student,
    /// 仅当密码由系统生成时返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_password: Option<String>,
}
