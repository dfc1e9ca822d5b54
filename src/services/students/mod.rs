pub mod get;
pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::ErrorCode;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

use super::{forbidden, internal_error};

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

/// 管理员、学生本人、以及给该学生上课的教师可以查看
pub(crate) async fn can_view_student(
    storage: &Arc<dyn Storage>,
    viewer: &User,
    student_id: i64,
) -> Result<(), HttpResponse> {
    let allowed = match viewer.role {
        UserRole::Admin => true,
        UserRole::Student => viewer.id == student_id,
        UserRole::Teacher => match storage.list_teacher_student_ids(viewer.id).await {
            Ok(ids) => ids.contains(&student_id),
            Err(e) => return Err(internal_error("Failed to load teacher students", e)),
        },
    };
    if allowed {
        Ok(())
    } else {
        Err(forbidden(ErrorCode::Forbidden, "Accès refusé à cet élève"))
    }
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        super::cache_from(request)
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        body: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_student(self, request, body).await
    }

    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_student(self, request, id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_student(self, request, id, body).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_student(self, request, id).await
    }

    pub async fn list_student_sessions(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        get::list_student_sessions(self, request, id).await
    }
}
