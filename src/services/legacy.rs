//! 旧版 `/api/users/*` 接口
//!
//! 返回 `{status, data, statusText}` 信封，错误同样走这个格式。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::common::LegacyResponse;
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

fn legacy_internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(LegacyResponse::new(
        500,
        serde_json::Value::Null,
        "Internal Server Error",
    ))
}

/// 按可见范围过滤学生，`None` 表示全部可见
fn visible_students(users: Vec<User>, visible: Option<&HashSet<i64>>) -> Vec<Student> {
    users
        .into_iter()
        .filter(|user| visible.is_none_or(|ids| ids.contains(&user.id)))
        .map(Student::from)
        .collect()
}

pub struct LegacyService {
    storage: Option<Arc<dyn Storage>>,
}

impl LegacyService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    async fn active_users(
        &self,
        request: &HttpRequest,
        role: UserRole,
    ) -> Result<Vec<User>, HttpResponse> {
        self.get_storage(request)
            .list_active_users_by_role(role)
            .await
            .map_err(|e| legacy_internal_error("Legacy user listing failed", e))
    }

    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.active_users(request, UserRole::Teacher).await {
            Ok(users) => {
                let teachers: Vec<Teacher> = users.into_iter().map(Teacher::from).collect();
                Ok(HttpResponse::Ok().json(LegacyResponse::new(200, teachers, "OK")))
            }
            Err(response) => Ok(response),
        }
    }

    /// 教师只拿到自己课节里的学生
    pub async fn list_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(caller) = RequireJWT::extract_user_claims(request) else {
            return Ok(HttpResponse::Unauthorized().json(LegacyResponse::new(
                401,
                serde_json::Value::Null,
                "Unauthorized",
            )));
        };

        let visible = match caller.role {
            UserRole::Admin => None,
            _ => match self
                .get_storage(request)
                .list_teacher_student_ids(caller.id)
                .await
            {
                Ok(ids) => Some(ids.into_iter().collect::<HashSet<i64>>()),
                Err(e) => return Ok(legacy_internal_error("Failed to load teacher students", e)),
            },
        };

        match self.active_users(request, UserRole::Student).await {
            Ok(users) => {
                let students = visible_students(users, visible.as_ref());
                Ok(HttpResponse::Ok().json(LegacyResponse::new(200, students, "OK")))
            }
            Err(response) => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn student(id: i64) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            email: format!("eleve{id}@eduroots.test"),
            password_hash: String::new(),
            role: UserRole::Student,
            status: UserStatus::Active,
            firstname: "Eleve".to_string(),
            lastname: id.to_string(),
            phone: None,
            gender: None,
            date_of_birth: None,
            parent_email: None,
            school_year: None,
            last_login: None,
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_teacher_sees_only_own_students() {
        let own: HashSet<i64> = [2].into_iter().collect();
        let visible = visible_students(vec![student(1), student(2), student(3)], Some(&own));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);

        let all = visible_students(vec![student(1), student(2)], None);
        assert_eq!(all.len(), 2);
    }
}
