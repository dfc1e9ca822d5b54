pub mod create;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::behaviors::entities::{MAX_RATING, MIN_RATING};
use crate::models::behaviors::requests::{
    BehaviorRecordInput, CreateBehaviorRequest, UpdateBehaviorRequest,
};
use crate::models::common::DateRangeParams;
use crate::services::records::PayloadErrors;
use crate::storage::Storage;

/// 评分必须落在 1..=5，返回两位小数的平均分
pub fn ratings_average(records: &[BehaviorRecordInput]) -> Result<f64, HttpResponse> {
    if records
        .iter()
        .any(|r| !(MIN_RATING..=MAX_RATING).contains(&r.rating))
    {
        return Err(PayloadErrors::Bare.reject("note hors limites"));
    }
    let ratings: Vec<i32> = records.iter().map(|r| r.rating).collect();
    super::stats::compute::behavior_average(&ratings)
        .ok_or_else(|| PayloadErrors::Bare.reject("aucun élève fourni"))
}

pub struct BehaviorService {
    storage: Option<Arc<dyn Storage>>,
}

impl BehaviorService {
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

    pub async fn list_behaviors(
        &self,
        request: &HttpRequest,
        session_id: i64,
        query: DateRangeParams,
    ) -> ActixResult<HttpResponse> {
        list::list_behaviors(self, request, session_id, query).await
    }

    pub async fn create_behavior(
        &self,
        request: &HttpRequest,
        session_id: i64,
        body: CreateBehaviorRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_behavior(self, request, session_id, body).await
    }

    pub async fn get_behavior(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_behavior(self, request, id).await
    }

    pub async fn update_behavior(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateBehaviorRequest,
    ) -> ActixResult<HttpResponse> {
        detail::update_behavior(self, request, id, body).await
    }

    pub async fn delete_behavior(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::delete_behavior(self, request, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student_id: i64, rating: i32) -> BehaviorRecordInput {
        BehaviorRecordInput {
            student_id,
            rating,
            comment: None,
        }
    }

    #[test]
    fn test_average_of_valid_ratings() {
        let avg = ratings_average(&[record(1, 4), record(2, 5), record(3, 4)]).unwrap();
        assert_eq!(avg, 4.33);
    }

    #[test]
    fn test_out_of_range_rating_is_rejected() {
        let resp = ratings_average(&[record(1, 6)]).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert!(ratings_average(&[record(1, 0)]).is_err());
        assert!(ratings_average(&[]).is_err());
    }
}
