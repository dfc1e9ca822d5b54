use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::attendances::requests::CreateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::records::{
    PayloadErrors, check_students, parse_record_date, resolve_writable_session,
};
use crate::services::stats::refresh::after_records_changed;
use crate::services::{conflict, current_user, internal_error, try_response};

use super::AttendanceService;

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
    body: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);
    try_response!(resolve_writable_session(request, &storage, &user, session_id).await);

    let errors = PayloadErrors::Detailed;
    let date = try_response!(parse_record_date(&storage, &body.date, errors).await);
    let student_ids: Vec<i64> = body.records.iter().map(|r| r.student_id).collect();
    try_response!(check_students(&storage, session_id, &student_ids, errors).await);

    match storage.attendance_exists(session_id, date).await {
        Ok(true) => {
            return Ok(conflict(
                ErrorCode::AttendanceAlreadyExists,
                "Une feuille de présence existe déjà pour cette date",
            ));
        }
        Ok(false) => {}
        Err(e) => return Ok(internal_error("Failed to check attendance", e)),
    }

    match storage
        .create_attendance(session_id, date, user.id, body.records)
        .await
    {
        Ok(attendance) => {
            info!(
                "Attendance {} recorded for session {} on {} by user {}",
                attendance.id, session_id, date, user.id
            );
            after_records_changed(&storage, &service.get_cache(request), session_id, &student_ids)
                .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(attendance, "Présences enregistrées")))
        }
        Err(e) if e.is_duplicate() => Ok(conflict(
            ErrorCode::AttendanceAlreadyExists,
            "Une feuille de présence existe déjà pour cette date",
        )),
        Err(e) => Ok(internal_error("Failed to create attendance", e)),
    }
}
