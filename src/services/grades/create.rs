use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::ApiResponse;
use crate::models::grades::requests::CreateGradeRequest;
use crate::services::records::{
    PayloadErrors, check_students, parse_record_date, resolve_writable_session,
};
use crate::services::stats::refresh::after_records_changed;
use crate::services::{current_user, internal_error, invalid_data, try_response};

use super::{GradeService, validate_grade_records};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    session_id: i64,
    body: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);
    try_response!(resolve_writable_session(request, &storage, &user, session_id).await);

    if let Err(reason) = validate_grade_records(&body.records) {
        return Ok(invalid_data(reason));
    }
    let errors = PayloadErrors::Detailed;
    let date = try_response!(parse_record_date(&storage, &body.date, errors).await);
    let student_ids: Vec<i64> = body.records.iter().map(|r| r.student_id).collect();
    try_response!(check_students(&storage, session_id, &student_ids, errors).await);

    // 同一天允许多次评估，不做唯一性检查
    match storage
        .create_grade(
            session_id,
            date,
            body.grade_type,
            body.is_draft,
            user.id,
            body.records,
        )
        .await
    {
        Ok(grade) => {
            info!(
                "Grade {} ({}) recorded for session {} on {}, draft={}",
                grade.id, grade.grade_type, session_id, date, grade.is_draft
            );
            after_records_changed(&storage, &service.get_cache(request), session_id, &student_ids)
                .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Notes enregistrées")))
        }
        Err(e) => Ok(internal_error("Failed to create grade", e)),
    }
}
