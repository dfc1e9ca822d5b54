use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::entity::format_date;
use crate::models::holidays::requests::{CreateHolidayRequest, UpdateHolidayRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, invalid_data, not_found};

use super::{HolidayService, validate_holiday};

pub async fn create_holiday(
    service: &HolidayService,
    request: &HttpRequest,
    body: CreateHolidayRequest,
) -> ActixResult<HttpResponse> {
    let (name, start, end) = match validate_holiday(&body.name, &body.start_date, &body.end_date) {
        Ok(valid) => valid,
        Err(reason) => return Ok(invalid_data(reason)),
    };

    let storage = service.get_storage(request);
    match storage.create_holiday(name, start, end).await {
        Ok(holiday) => {
            info!("Holiday {} created ({} -> {})", holiday.id, start, end);
            Ok(HttpResponse::Created().json(ApiResponse::success(holiday, "Congé créé")))
        }
        Err(e) => Ok(internal_error("Failed to create holiday", e)),
    }
}

pub async fn update_holiday(
    service: &HolidayService,
    request: &HttpRequest,
    id: i64,
    body: UpdateHolidayRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut holiday = match storage.get_holiday_by_id(id).await {
        Ok(Some(holiday)) => holiday,
        Ok(None) => return Ok(not_found(ErrorCode::HolidayNotFound, "Congé introuvable")),
        Err(e) => return Ok(internal_error("Failed to load holiday", e)),
    };

    // 合并后整体校验
    let name = body.name.unwrap_or_else(|| holiday.name.clone());
    let start = body
        .start_date
        .unwrap_or_else(|| format_date(holiday.start_date));
    let end = body
        .end_date
        .unwrap_or_else(|| format_date(holiday.end_date));
    let (name, start, end) = match validate_holiday(&name, &start, &end) {
        Ok(valid) => valid,
        Err(reason) => return Ok(invalid_data(reason)),
    };

    holiday.name = name;
    holiday.start_date = start;
    holiday.end_date = end;
    if let Some(is_active) = body.is_active {
        holiday.is_active = is_active;
    }

    match storage.update_holiday(holiday).await {
        Ok(Some(updated)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Congé mis à jour")))
        }
        Ok(None) => Ok(not_found(ErrorCode::HolidayNotFound, "Congé introuvable")),
        Err(e) => Ok(internal_error("Failed to update holiday", e)),
    }
}

pub async fn delete_holiday(
    service: &HolidayService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.soft_delete_holiday(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Congé supprimé"))),
        Ok(false) => Ok(not_found(ErrorCode::HolidayNotFound, "Congé introuvable")),
        Err(e) => Ok(internal_error("Failed to delete holiday", e)),
    }
}
