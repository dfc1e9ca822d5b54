use super::entities::{Gender, UserRole, UserStatus};
use serde::Deserialize;
use ts_rs::TS;

// 用户创建请求（用于存储层，password 字段为哈希后的值）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub parent_email: Option<String>,
    pub school_year: Option<String>,
}

// 用户更新请求（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<UserStatus>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub parent_email: Option<String>,
    pub school_year: Option<String>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub search: Option<String>,
    pub school_year: Option<String>,
    pub include_inactive: bool,
    /// 仅返回这些 ID 中的用户（教师查看自己学生时使用）
    pub restrict_to_ids: Option<Vec<i64>>,
}
