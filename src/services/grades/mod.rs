pub mod create;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::common::DateRangeParams;
use crate::models::grades::entities::MAX_GRADE_VALUE;
use crate::models::grades::requests::{CreateGradeRequest, GradeRecordInput, UpdateGradeRequest};
use crate::storage::Storage;

/// 缺考行不带分数，其余行分数必须在 0..=20
pub fn validate_grade_records(records: &[GradeRecordInput]) -> Result<(), String> {
    for record in records {
        match (record.is_absent, record.value) {
            (true, Some(_)) => {
                return Err(format!(
                    "l'élève {} est absent mais a une note",
                    record.student_id
                ));
            }
            (false, None) => {
                return Err(format!("note manquante pour l'élève {}", record.student_id));
            }
            (false, Some(value))
                if !value.is_finite() || !(0.0..=MAX_GRADE_VALUE).contains(&value) =>
            {
                return Err(format!(
                    "la note de l'élève {} doit être comprise entre 0 et {MAX_GRADE_VALUE}",
                    record.student_id
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        session_id: i64,
        query: DateRangeParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, session_id, query).await
    }

    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        session_id: i64,
        body: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, session_id, body).await
    }

    pub async fn get_grade(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_grade(self, request, id).await
    }

    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        detail::update_grade(self, request, id, body).await
    }

    pub async fn delete_grade(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::delete_grade(self, request, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(student_id: i64, value: Option<f64>, is_absent: bool) -> GradeRecordInput {
        GradeRecordInput {
            student_id,
            value,
            is_absent,
            comment: None,
        }
    }

    #[test]
    fn test_valid_records() {
        let records = [row(1, Some(14.5), false), row(2, None, true), row(3, Some(0.0), false)];
        assert!(validate_grade_records(&records).is_ok());
    }

    #[test]
    fn test_absent_rule() {
        assert!(validate_grade_records(&[row(1, Some(10.0), true)]).is_err());
        assert!(validate_grade_records(&[row(1, None, false)]).is_err());
    }

    #[test]
    fn test_value_range() {
        assert!(validate_grade_records(&[row(1, Some(20.0), false)]).is_ok());
        assert!(validate_grade_records(&[row(1, Some(20.5), false)]).is_err());
        assert!(validate_grade_records(&[row(1, Some(-1.0), false)]).is_err());
        assert!(validate_grade_records(&[row(1, Some(f64::NAN), false)]).is_err());
    }
}
