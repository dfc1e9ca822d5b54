use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::students::entities::Student;
use crate::models::users::entities::UserRole;
use crate::services::schedules::ordering::sort_sessions;
use crate::services::users::load_account;
use crate::services::{current_user, internal_error, try_response};

use super::{StudentService, can_view_student};

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    try_response!(can_view_student(&storage, &user, id).await);
    let student = try_response!(load_account(&storage, id, UserRole::Student).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(Student::from(student), "Élève récupéré")))
}

pub async fn list_student_sessions(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    try_response!(can_view_student(&storage, &user, id).await);
    try_response!(load_account(&storage, id, UserRole::Student).await);

    match storage.list_student_sessions(id).await {
        Ok(mut sessions) => {
            sort_sessions(&mut sessions);
            Ok(HttpResponse::Ok().json(ApiResponse::success(sessions, "Séances récupérées")))
        }
        Err(e) => Ok(internal_error("Failed to list student sessions", e)),
    }
}
