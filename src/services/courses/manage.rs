use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::config::AppConfig;
use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::stats::refresh::invalidate_all_stats;
use crate::services::{internal_error, invalid_data, not_found, try_response};
use crate::utils::validate::validate_school_year;

use super::{CourseService, check_teachers, sorted_course, validate_session_times};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    body: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let school_year = body
        .school_year
        .unwrap_or_else(|| AppConfig::get().school.default_school_year.clone());
    if let Err(reason) = validate_school_year(&school_year) {
        return Ok(invalid_data(reason));
    }
    if body.sessions.is_empty() {
        return Ok(invalid_data("au moins une séance est requise"));
    }

    let schedules = match storage.list_schedules().await {
        Ok(schedules) => schedules,
        Err(e) => return Ok(internal_error("Failed to load schedules", e)),
    };
    for session in &body.sessions {
        if session.level.trim().is_empty() {
            return Ok(invalid_data("niveau requis"));
        }
        if let Err(reason) = validate_session_times(
            session.time_slot,
            &session.start_time,
            &session.end_time,
            &schedules,
        ) {
            return Ok(invalid_data(reason));
        }
    }

    try_response!(check_teachers(&storage, &body.teacher_ids).await);

    match storage
        .create_course(school_year, body.teacher_ids, body.sessions)
        .await
    {
        Ok(course) => {
            info!(
                "Course {} created for {} with {} session(s)",
                course.id,
                course.school_year,
                course.sessions.len()
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(sorted_course(course), "Cours créé")))
        }
        Err(e) => Ok(internal_error("Failed to create course", e)),
    }
}

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    body: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(school_year) = &body.school_year
        && let Err(reason) = validate_school_year(school_year)
    {
        return Ok(invalid_data(reason));
    }
    if let Some(teacher_ids) = &body.teacher_ids {
        try_response!(check_teachers(&storage, teacher_ids).await);
    }

    match storage.update_course(course_id, body).await {
        Ok(Some(course)) => {
            info!("Course {} updated", course_id);
            invalidate_all_stats(&service.get_cache(request)).await;
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(sorted_course(course), "Cours mis à jour")))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Cours introuvable")),
        Err(e) => Ok(internal_error("Failed to update course", e)),
    }
}

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.soft_delete_course(course_id).await {
        Ok(true) => {
            info!("Course {} soft deleted", course_id);
            invalidate_all_stats(&service.get_cache(request)).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Cours supprimé")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Cours introuvable")),
        Err(e) => Ok(internal_error("Failed to delete course", e)),
    }
}
