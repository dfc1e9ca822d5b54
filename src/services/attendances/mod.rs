pub mod create;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::attendances::requests::{CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::models::common::DateRangeParams;
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    pub async fn list_attendances(
        &self,
        request: &HttpRequest,
        session_id: i64,
        query: DateRangeParams,
    ) -> ActixResult<HttpResponse> {
        list::list_attendances(self, request, session_id, query).await
    }

    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        session_id: i64,
        body: CreateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_attendance(self, request, session_id, body).await
    }

    pub async fn get_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_attendance(self, request, id).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        detail::update_attendance(self, request, id, body).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::delete_attendance(self, request, id).await
    }
}
