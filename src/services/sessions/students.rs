use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::info;

use crate::models::courses::requests::EnrollStudentsRequest;
use crate::models::students::entities::Student;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::records::{resolve_session, resolve_writable_session};
use crate::services::stats::refresh::evict_session_teachers;
use crate::services::{
    bad_request, current_user, internal_error, invalid_data, not_found, try_response,
};

use super::SessionService;

pub async fn list_students(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);
    try_response!(resolve_session(request, &storage, &user, session_id).await);

    match storage.list_session_students(session_id).await {
        Ok(users) => {
            let students: Vec<Student> = users.into_iter().map(Student::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(students, "Élèves récupérés")))
        }
        Err(e) => Ok(internal_error("Failed to list session students", e)),
    }
}

/// 重复选课不会报错，只计入 already_enrolled
pub async fn enroll_students(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
    body: EnrollStudentsRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);
    try_response!(resolve_writable_session(request, &storage, &user, session_id).await);

    let mut seen = HashSet::new();
    let student_ids: Vec<i64> = body
        .student_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();
    if student_ids.is_empty() {
        return Ok(invalid_data("aucun élève fourni"));
    }

    let users = match storage.get_users_by_ids(student_ids.clone()).await {
        Ok(users) => users,
        Err(e) => return Ok(internal_error("Failed to load students", e)),
    };
    let valid = users
        .iter()
        .filter(|u| u.role == UserRole::Student && u.is_active)
        .count();
    if valid != student_ids.len() {
        return Ok(bad_request(
            ErrorCode::UserRoleMismatch,
            "Élève inconnu ou inactif",
        ));
    }

    match storage.enroll_students(session_id, student_ids).await {
        Ok(result) => {
            info!(
                "Session {}: {} student(s) enrolled, {} already present",
                session_id, result.enrolled, result.already_enrolled
            );
            evict_session_teachers(&storage, &service.get_cache(request), session_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Élèves inscrits")))
        }
        Err(e) => Ok(internal_error("Failed to enroll students", e)),
    }
}

pub async fn unenroll_student(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);
    try_response!(resolve_writable_session(request, &storage, &user, session_id).await);

    match storage.unenroll_student(session_id, student_id).await {
        Ok(true) => {
            info!("Student {} removed from session {}", student_id, session_id);
            evict_session_teachers(&storage, &service.get_cache(request), session_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Élève désinscrit")))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::StudentNotEnrolled,
            "L'élève n'est pas inscrit à cette séance",
        )),
        Err(e) => Ok(internal_error("Failed to unenroll student", e)),
    }
}
