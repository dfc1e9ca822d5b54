//! 统计服务
//!
//! 学生与教师统计按 `stats:{kind}:{id}` 缓存，出勤、行为、成绩的任何写入都会清除相关键。

pub mod compute;
pub mod dashboard;
pub mod refresh;
pub mod student;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::storage::Storage;

pub fn student_stats_key(student_id: i64) -> String {
    format!("stats:student:{student_id}")
}

pub fn teacher_stats_key(teacher_id: i64) -> String {
    format!("stats:teacher:{teacher_id}")
}

pub struct StatsService {
    storage: Option<Arc<dyn Storage>>,
}

impl StatsService {
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

    pub async fn get_student_stats(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        student::get_student_stats(self, request, student_id).await
    }

    pub async fn get_teacher_stats(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        teacher::get_teacher_stats(self, request, teacher_id).await
    }

    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::get_dashboard(self, request).await
    }
}
