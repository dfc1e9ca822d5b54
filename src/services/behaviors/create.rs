use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::behaviors::requests::CreateBehaviorRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::records::{
    PayloadErrors, check_students, parse_record_date, resolve_writable_session,
};
use crate::services::stats::refresh::after_records_changed;
use crate::services::{conflict, current_user, internal_error, try_response};

use super::{BehaviorService, ratings_average};

pub async fn create_behavior(
    service: &BehaviorService,
    request: &HttpRequest,
    session_id: i64,
    body: CreateBehaviorRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);
    try_response!(resolve_writable_session(request, &storage, &user, session_id).await);

    let average = try_response!(ratings_average(&body.records));
    let date = try_response!(parse_record_date(&storage, &body.date, PayloadErrors::Bare).await);
    let student_ids: Vec<i64> = body.records.iter().map(|r| r.student_id).collect();
    try_response!(check_students(&storage, session_id, &student_ids, PayloadErrors::Bare).await);

    match storage.behavior_exists(session_id, date).await {
        Ok(true) => {
            return Ok(conflict(
                ErrorCode::BehaviorAlreadyExists,
                "Une évaluation de comportement existe déjà pour cette date",
            ));
        }
        Ok(false) => {}
        Err(e) => return Ok(internal_error("Failed to check behavior", e)),
    }

    match storage
        .create_behavior(session_id, date, user.id, average, body.records)
        .await
    {
        Ok(behavior) => {
            info!(
                "Behavior {} recorded for session {} on {} (average {})",
                behavior.id, session_id, date, average
            );
            after_records_changed(&storage, &service.get_cache(request), session_id, &student_ids)
                .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                behavior,
                "Évaluation de comportement enregistrée",
            )))
        }
        Err(e) if e.is_duplicate() => Ok(conflict(
            ErrorCode::BehaviorAlreadyExists,
            "Une évaluation de comportement existe déjà pour cette date",
        )),
        Err(e) => Ok(internal_error("Failed to create behavior", e)),
    }
}
