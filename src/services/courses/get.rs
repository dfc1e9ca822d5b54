use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, internal_error, not_found, try_response};

use super::{CourseService, sorted_course};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Cours introuvable")),
        Err(e) => return Ok(internal_error("Failed to load course", e)),
    };

    if user.role != UserRole::Admin {
        let teaches = course.is_active && course.teachers.iter().any(|t| t.id == user.id);
        if !teaches {
            return Ok(forbidden(ErrorCode::Forbidden, "Accès refusé à ce cours"));
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(sorted_course(course), "Cours récupéré")))
}
