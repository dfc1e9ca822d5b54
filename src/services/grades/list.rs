use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::common::{DateRangeParams, RecordListQuery};
use crate::services::records::{parse_range, resolve_session};
use crate::services::{current_user, internal_error, try_response};

use super::GradeService;

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    session_id: i64,
    query: DateRangeParams,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);
    try_response!(resolve_session(request, &storage, &user, session_id).await);
    let (from, to) = try_response!(parse_range(&query));

    let list_query = RecordListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_session_id: session_id,
        from,
        to,
    };

    match storage.list_grades_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Notes récupérées",
        ))),
        Err(e) => Ok(internal_error("Failed to list behaviors", e)),
    }
}
