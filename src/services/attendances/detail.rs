use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendances::entities::Attendance;
use crate::models::attendances::requests::UpdateAttendanceRequest;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::records::{PayloadErrors, authorize_session, check_students, ensure_writable};
use crate::services::stats::refresh::after_records_changed;
use crate::services::{current_user, internal_error, not_found, try_response};

use super::AttendanceService;

// 读取出勤表并按其课节鉴权
async fn load_authorized(
    service: &AttendanceService,
    request: &HttpRequest,
    user: &User,
    id: i64,
    for_write: bool,
) -> Result<Attendance, HttpResponse> {
    let storage = service.get_storage(request);
    let attendance = match storage.get_attendance_by_id(id).await {
        Ok(Some(attendance)) if attendance.is_active => attendance,
        Ok(_) => {
            return Err(not_found(
                ErrorCode::AttendanceNotFound,
                "Feuille de présence introuvable",
            ));
        }
        Err(e) => return Err(internal_error("Failed to load attendance", e)),
    };
    let session = authorize_session(&storage, user, attendance.course_session_id).await?;
    if for_write {
        ensure_writable(session)?;
    }
    Ok(attendance)
}

pub async fn get_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let attendance = try_response!(load_authorized(service, request, &user, id, false).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(attendance, "Feuille de présence récupérée")))
}

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
    body: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let current = try_response!(load_authorized(service, request, &user, id, true).await);
    let storage = service.get_storage(request);

    let session_id = current.course_session_id;
    let new_ids: Vec<i64> = body.records.iter().map(|r| r.student_id).collect();
    try_response!(check_students(&storage, session_id, &new_ids, PayloadErrors::Detailed).await);

    match storage.replace_attendance_records(id, body.records).await {
        Ok(Some(updated)) => {
            let mut affected: Vec<i64> = current.records.iter().map(|r| r.student_id).collect();
            affected.extend(new_ids);
            let cache = service.get_cache(request);
            after_records_changed(&storage, &cache, session_id, &affected).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Présences mises à jour")))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Feuille de présence introuvable",
        )),
        Err(e) => Ok(internal_error("Failed to update attendance", e)),
    }
}

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let current = try_response!(load_authorized(service, request, &user, id, true).await);
    let storage = service.get_storage(request);

    match storage.soft_delete_attendance(id).await {
        Ok(true) => {
            let affected: Vec<i64> = current.records.iter().map(|r| r.student_id).collect();
            after_records_changed(
                &storage,
                &service.get_cache(request),
                current.course_session_id,
                &affected,
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Feuille de présence supprimée")))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Feuille de présence introuvable",
        )),
        Err(e) => Ok(internal_error("Failed to delete attendance", e)),
    }
}
