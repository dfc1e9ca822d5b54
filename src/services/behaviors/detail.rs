use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::behaviors::entities::Behavior;
use crate::models::behaviors::requests::UpdateBehaviorRequest;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::records::{PayloadErrors, authorize_session, check_students, ensure_writable};
use crate::services::stats::refresh::after_records_changed;
use crate::services::{current_user, internal_error, not_found, try_response};

use super::{BehaviorService, ratings_average};

fn behavior_not_found() -> HttpResponse {
    not_found(
        ErrorCode::BehaviorNotFound,
        "Évaluation de comportement introuvable",
    )
}

async fn load_authorized(
    service: &BehaviorService,
    request: &HttpRequest,
    user: &User,
    id: i64,
    for_write: bool,
) -> Result<Behavior, HttpResponse> {
    let storage = service.get_storage(request);
    let behavior = match storage.get_behavior_by_id(id).await {
        Ok(Some(behavior)) if behavior.is_active => behavior,
        Ok(_) => return Err(behavior_not_found()),
        Err(e) => return Err(internal_error("Failed to load behavior", e)),
    };
    let session = authorize_session(&storage, user, behavior.course_session_id).await?;
    if for_write {
        ensure_writable(session)?;
    }
    Ok(behavior)
}

pub async fn get_behavior(
    service: &BehaviorService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let behavior = try_response!(load_authorized(service, request, &user, id, false).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        behavior,
        "Évaluation de comportement récupérée",
    )))
}

pub async fn update_behavior(
    service: &BehaviorService,
    request: &HttpRequest,
    id: i64,
    body: UpdateBehaviorRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let current = try_response!(load_authorized(service, request, &user, id, true).await);
    let storage = service.get_storage(request);

    let average = try_response!(ratings_average(&body.records));
    let session_id = current.course_session_id;
    let new_ids: Vec<i64> = body.records.iter().map(|r| r.student_id).collect();
    try_response!(check_students(&storage, session_id, &new_ids, PayloadErrors::Bare).await);

    match storage
        .replace_behavior_records(id, average, body.records)
        .await
    {
        Ok(Some(updated)) => {
            let mut affected: Vec<i64> = current.records.iter().map(|r| r.student_id).collect();
            affected.extend(new_ids);
            let cache = service.get_cache(request);
            after_records_changed(&storage, &cache, session_id, &affected).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Évaluation de comportement mise à jour",
            )))
        }
        Ok(None) => Ok(behavior_not_found()),
        Err(e) => Ok(internal_error("Failed to update behavior", e)),
    }
}

pub async fn delete_behavior(
    service: &BehaviorService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let current = try_response!(load_authorized(service, request, &user, id, true).await);
    let storage = service.get_storage(request);

    match storage.soft_delete_behavior(id).await {
        Ok(true) => {
            let affected: Vec<i64> = current.records.iter().map(|r| r.student_id).collect();
            after_records_changed(
                &storage,
                &service.get_cache(request),
                current.course_session_id,
                &affected,
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Évaluation de comportement supprimée",
            )))
        }
        Ok(false) => Ok(behavior_not_found()),
        Err(e) => Ok(internal_error("Failed to delete behavior", e)),
    }
}
