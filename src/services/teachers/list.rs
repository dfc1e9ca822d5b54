use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::common::PaginatedResponse;
use crate::models::teachers::entities::Teacher;
use crate::models::teachers::requests::TeacherListParams;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UserListQuery;
use crate::services::{current_user, internal_error, try_response};

use super::TeacherService;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherListParams,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: Some(UserRole::Teacher),
        search: query.search,
        include_inactive: query.include_inactive && user.role == UserRole::Admin,
        ..Default::default()
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => {
            let page = PaginatedResponse {
                items: response.items.into_iter().map(Teacher::from).collect(),
                pagination: response.pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Enseignants récupérés")))
        }
        Err(e) => Ok(internal_error("Failed to list teachers", e)),
    }
}
