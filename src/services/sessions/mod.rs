//! 课节详情、修改与选课

pub mod students;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::models::courses::requests::{EnrollStudentsRequest, UpdateSessionRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::cache::ObjectCache;
use crate::storage::Storage;

use super::courses::validate_session_times;
use super::records::{resolve_session, resolve_writable_session};
use super::{current_user, internal_error, invalid_data, not_found, try_response};

pub struct SessionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SessionService {
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

    pub async fn get_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        let user = try_response!(current_user(request));
        let storage = self.get_storage(request);
        let session = try_response!(resolve_session(request, &storage, &user, session_id).await);
        Ok(HttpResponse::Ok().json(ApiResponse::success(session, "Séance récupérée")))
    }

    /// 合并后整体校验时间，再写入
    pub async fn update_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
        body: UpdateSessionRequest,
    ) -> ActixResult<HttpResponse> {
        let user = try_response!(current_user(request));
        let storage = self.get_storage(request);
        let current =
            try_response!(resolve_writable_session(request, &storage, &user, session_id).await);

        if let Some(level) = &body.level
            && level.trim().is_empty()
        {
            return Ok(invalid_data("niveau requis"));
        }

        let time_slot = body.time_slot.unwrap_or(current.time_slot);
        let start_time = body.start_time.as_deref().unwrap_or(&current.start_time);
        let end_time = body.end_time.as_deref().unwrap_or(&current.end_time);
        let schedules = match storage.list_schedules().await {
            Ok(schedules) => schedules,
            Err(e) => return Ok(internal_error("Failed to load schedules", e)),
        };
        if let Err(reason) = validate_session_times(time_slot, start_time, end_time, &schedules) {
            return Ok(invalid_data(reason));
        }

        match storage.update_session(session_id, body).await {
            Ok(Some(session)) => {
                info!("Session {} updated by user {}", session_id, user.id);
                Ok(HttpResponse::Ok().json(ApiResponse::success(session, "Séance mise à jour")))
            }
            Ok(None) => Ok(not_found(ErrorCode::SessionNotFound, "Séance introuvable")),
            Err(e) => Ok(internal_error("Failed to update session", e)),
        }
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        students::list_students(self, request, session_id).await
    }

    pub async fn enroll_students(
        &self,
        request: &HttpRequest,
        session_id: i64,
        body: EnrollStudentsRequest,
    ) -> ActixResult<HttpResponse> {
        students::enroll_students(self, request, session_id, body).await
    }

    pub async fn unenroll_student(
        &self,
        request: &HttpRequest,
        session_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        students::unenroll_student(self, request, session_id, student_id).await
    }
}
