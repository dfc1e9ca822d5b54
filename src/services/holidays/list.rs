use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::holidays::requests::HolidayListParams;
use crate::models::holidays::responses::HolidayListResponse;
use crate::models::users::entities::UserRole;
use crate::services::{current_user, internal_error, try_response};

use super::HolidayService;

pub async fn list_holidays(
    service: &HolidayService,
    request: &HttpRequest,
    query: HolidayListParams,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    // 非管理员忽略 include_inactive
    let include_inactive = query.include_inactive && user.role == UserRole::Admin;
    match storage.list_holidays(include_inactive).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HolidayListResponse { items },
            "Congés récupérés",
        ))),
        Err(e) => Ok(internal_error("Failed to list holidays", e)),
    }
}

// end_date >= 今天，按开始日期升序
pub async fn list_upcoming(
    service: &HolidayService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let today = chrono::Local::now().date_naive();

    match storage.list_holidays(false).await {
        Ok(holidays) => {
            let mut items: Vec<_> = holidays
                .into_iter()
                .filter(|h| h.end_date >= today)
                .collect();
            items.sort_by_key(|h| (h.start_date, h.id));
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                HolidayListResponse { items },
                "Congés à venir récupérés",
            )))
        }
        Err(e) => Ok(internal_error("Failed to list upcoming holidays", e)),
    }
}
