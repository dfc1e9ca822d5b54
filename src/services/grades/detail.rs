use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::grades::entities::Grade;
use crate::models::grades::requests::UpdateGradeRequest;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::records::{PayloadErrors, authorize_session, check_students, ensure_writable};
use crate::services::stats::refresh::after_records_changed;
use crate::services::{current_user, internal_error, invalid_data, not_found, try_response};

use super::{GradeService, validate_grade_records};

fn grade_not_found() -> HttpResponse {
    not_found(ErrorCode::GradeNotFound, "Évaluation introuvable")
}

async fn load_authorized(
    service: &GradeService,
    request: &HttpRequest,
    user: &User,
    id: i64,
    for_write: bool,
) -> Result<Grade, HttpResponse> {
    let storage = service.get_storage(request);
    let grade = match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) if grade.is_active => grade,
        Ok(_) => return Err(grade_not_found()),
        Err(e) => return Err(internal_error("Failed to load grade", e)),
    };
    let session = authorize_session(&storage, user, grade.course_session_id).await?;
    if for_write {
        ensure_writable(session)?;
    }
    Ok(grade)
}

pub async fn get_grade(
    service: &GradeService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let grade = try_response!(load_authorized(service, request, &user, id, false).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Évaluation récupérée")))
}

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    id: i64,
    body: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let current = try_response!(load_authorized(service, request, &user, id, true).await);
    let storage = service.get_storage(request);
    let session_id = current.course_session_id;

    let mut affected: Vec<i64> = current.records.iter().map(|r| r.student_id).collect();
    if let Some(records) = &body.records {
        if let Err(reason) = validate_grade_records(records) {
            return Ok(invalid_data(reason));
        }
        let new_ids: Vec<i64> = records.iter().map(|r| r.student_id).collect();
        let errors = PayloadErrors::Detailed;
        try_response!(check_students(&storage, session_id, &new_ids, errors).await);
        affected.extend(new_ids);
    }

    match storage
        .update_grade(id, body.grade_type, body.is_draft, body.records)
        .await
    {
        Ok(Some(updated)) => {
            let cache = service.get_cache(request);
            after_records_changed(&storage, &cache, session_id, &affected).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Évaluation mise à jour")))
        }
        Ok(None) => Ok(grade_not_found()),
        Err(e) => Ok(internal_error("Failed to update grade", e)),
    }
}

pub async fn delete_grade(
    service: &GradeService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let current = try_response!(load_authorized(service, request, &user, id, true).await);
    let storage = service.get_storage(request);

    match storage.soft_delete_grade(id).await {
        Ok(true) => {
            let affected: Vec<i64> = current.records.iter().map(|r| r.student_id).collect();
            after_records_changed(
                &storage,
                &service.get_cache(request),
                current.course_session_id,
                &affected,
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Évaluation supprimée")))
        }
        Ok(false) => Ok(grade_not_found()),
        Err(e) => Ok(internal_error("Failed to delete grade", e)),
    }
}
