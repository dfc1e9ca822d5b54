use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::{Gender, User};

/// 教师视图（角色为 teacher 的用户）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub is_active: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for Teacher {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
            phone: user.phone,
            gender: user.gender,
            is_active: user.is_active,
            deleted_at: user.deleted_at,
            created_at: user.created_at,
        }
    }
}
