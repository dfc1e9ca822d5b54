use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::{Gender, User};

/// 学生视图（角色为 student 的用户）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub parent_email: Option<String>,
    pub school_year: Option<String>,
    pub is_active: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for Student {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
            phone: user.phone,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
            parent_email: user.parent_email,
            school_year: user.school_year,
            is_active: user.is_active,
            deleted_at: user.deleted_at,
            created_at: user.created_at,
        }
    }
}
