use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::courses::entities::Course;
use crate::models::teachers::entities::Teacher;
use crate::models::users::entities::UserRole;
use crate::services::courses::sorted_course;
use crate::services::users::load_account;
use crate::services::{internal_error, try_response};

use super::TeacherService;

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teacher = try_response!(load_account(&storage, id, UserRole::Teacher).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(Teacher::from(teacher), "Enseignant récupéré")))
}

/// 教师的课程，课程按学年倒序，课节按作息顺序
pub async fn list_teacher_courses(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    try_response!(load_account(&storage, id, UserRole::Teacher).await);

    match storage.list_teacher_courses(id).await {
        Ok(courses) => {
            let mut courses: Vec<Course> = courses.into_iter().map(sorted_course).collect();
            courses.sort_by(|a, b| b.school_year.cmp(&a.school_year).then(a.id.cmp(&b.id)));
            Ok(HttpResponse::Ok().json(ApiResponse::success(courses, "Cours récupérés")))
        }
        Err(e) => Ok(internal_error("Failed to list teacher courses", e)),
    }
}
