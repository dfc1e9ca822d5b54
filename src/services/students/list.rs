use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::common::PaginatedResponse;
use crate::models::students::entities::Student;
use crate::models::students::requests::StudentListParams;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UserListQuery;
use crate::services::{current_user, internal_error, try_response};

use super::StudentService;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListParams,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    // 教师只看自己课节里的学生
    let restrict_to_ids = match user.role {
        UserRole::Admin => None,
        _ => match storage.list_teacher_student_ids(user.id).await {
            Ok(ids) => Some(ids),
            Err(e) => return Ok(internal_error("Failed to load teacher students", e)),
        },
    };

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: Some(UserRole::Student),
        search: query.search,
        school_year: query.school_year,
        include_inactive: query.include_inactive && user.role == UserRole::Admin,
        restrict_to_ids,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => {
            let page = PaginatedResponse {
                items: response.items.into_iter().map(Student::from).collect(),
                pagination: response.pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Élèves récupérés")))
        }
        Err(e) => Ok(internal_error("Failed to list students", e)),
    }
}
