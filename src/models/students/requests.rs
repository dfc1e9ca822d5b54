use crate::models::common::PaginationQuery;
use crate::models::users::entities::Gender;
use serde::Deserialize;
use ts_rs::TS;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub school_year: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

// 创建学生请求
//
// 未提供 password 时自动生成一个随机密码，并只在本次响应中返回一次。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub email: String,
    pub password: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    /// YYYY-MM-DD
    pub date_of_birth: Option<String>,
    pub parent_email: Option<String>,
    pub school_year: Option<String>,
}

// 更新学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub parent_email: Option<String>,
    pub school_year: Option<String>,
}
