use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::courses::requests::{CourseListParams, CourseListQuery};
use crate::models::courses::responses::CourseListResponse;
use crate::models::users::entities::UserRole;
use crate::services::{current_user, internal_error, try_response};

use super::{CourseService, sorted_course};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseListParams,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    // 教师只能看到自己任教的课程
    let (teacher_id, include_inactive) = match user.role {
        UserRole::Admin => (query.teacher_id, query.include_inactive),
        _ => (Some(user.id), false),
    };

    let list_query = CourseListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        school_year: query.school_year,
        teacher_id,
        include_inactive,
    };

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => {
            let response = CourseListResponse {
                items: response.items.into_iter().map(sorted_course).collect(),
                pagination: response.pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Cours récupérés")))
        }
        Err(e) => Ok(internal_error("Failed to list courses", e)),
    }
}
