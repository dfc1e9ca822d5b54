//! 作息与上课日历

pub mod calendar;
pub mod ordering;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::courses::entities::TimeSlot;
use crate::models::schedules::entities::Schedule;
use crate::models::schedules::requests::{CalendarParams, ScheduleInput, UpdateSchedulesRequest};
use crate::models::schedules::responses::{CalendarResponse, ScheduleListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{parse_date, parse_time};

use super::{bad_request, internal_error, invalid_data};
use calendar::{DEFAULT_CALENDAR_COUNT, MAX_CALENDAR_COUNT, upcoming_class_days};

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

/// 校验一组作息：时间格式合法、start < middle < end、时间段不重复
pub fn validate_schedules(schedules: &[ScheduleInput]) -> Result<(), String> {
    if schedules.is_empty() {
        return Err("aucun horaire fourni".to_string());
    }
    let mut seen = HashSet::new();
    for schedule in schedules {
        if !seen.insert(schedule.time_slot) {
            return Err(format!("créneau en double: {}", schedule.time_slot));
        }
        let start = parse_time(&schedule.start_time).map_err(str::to_string)?;
        let middle = parse_time(&schedule.middle_time).map_err(str::to_string)?;
        let end = parse_time(&schedule.end_time).map_err(str::to_string)?;
        if !(start < middle && middle < end) {
            return Err(format!(
                "horaires incohérents pour {}: début < milieu < fin attendu",
                schedule.time_slot
            ));
        }
    }
    Ok(())
}

/// 课节时间是否落在该时间段的作息窗口内
///
/// 时间段尚未配置作息时不做限制。
pub fn fits_schedule(slot: TimeSlot, start: &str, end: &str, schedules: &[Schedule]) -> bool {
    match schedules.iter().find(|s| s.time_slot == slot) {
        Some(schedule) => {
            schedule.start_time.as_str() <= start && end <= schedule.end_time.as_str()
        }
        None => true,
    }
}

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn list_schedules(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.list_schedules().await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                ScheduleListResponse { items },
                "Horaires récupérés",
            ))),
            Err(e) => Ok(internal_error("Failed to list schedules", e)),
        }
    }

    pub async fn update_schedules(
        &self,
        request: &HttpRequest,
        body: UpdateSchedulesRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(reason) = validate_schedules(&body.schedules) {
            return Ok(bad_request(
                ErrorCode::ScheduleInvalid,
                format!("Données invalides: {reason}"),
            ));
        }

        let storage = self.get_storage(request);
        match storage.replace_schedules(body.schedules).await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                ScheduleListResponse { items },
                "Horaires mis à jour",
            ))),
            Err(e) => Ok(internal_error("Failed to update schedules", e)),
        }
    }

    pub async fn get_calendar(
        &self,
        request: &HttpRequest,
        query: CalendarParams,
    ) -> ActixResult<HttpResponse> {
        let from = match query.from.as_deref() {
            Some(raw) => match parse_date(raw) {
                Ok(date) => date,
                Err(reason) => return Ok(invalid_data(reason)),
            },
            None => chrono::Local::now().date_naive(),
        };
        let count = query.count.unwrap_or(DEFAULT_CALENDAR_COUNT);
        if !(1..=MAX_CALENDAR_COUNT).contains(&count) {
            return Ok(invalid_data(format!(
                "count doit être compris entre 1 et {MAX_CALENDAR_COUNT}"
            )));
        }

        let storage = self.get_storage(request);
        let schedules = match storage.list_schedules().await {
            Ok(schedules) => schedules,
            Err(e) => return Ok(internal_error("Failed to list schedules", e)),
        };
        let holidays = match storage.list_holidays(false).await {
            Ok(holidays) => holidays,
            Err(e) => return Ok(internal_error("Failed to list holidays", e)),
        };

        let slots: Vec<TimeSlot> = schedules.iter().map(|s| s.time_slot).collect();
        let days = upcoming_class_days(
            from,
            count as usize,
            &slots,
            &holidays,
            AppConfig::get().school.calendar_max_days,
        );

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            CalendarResponse { from, days },
            "Calendrier récupéré",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(slot: TimeSlot, start: &str, middle: &str, end: &str) -> ScheduleInput {
        ScheduleInput {
            time_slot: slot,
            start_time: start.to_string(),
            middle_time: middle.to_string(),
            end_time: end.to_string(),
        }
    }

    #[test]
    fn test_validate_schedules() {
        let slot = TimeSlot::SaturdayMorning;
        assert!(validate_schedules(&[input(slot, "09:00", "10:30", "12:00")]).is_ok());
        assert!(validate_schedules(&[input(slot, "09:00", "09:00", "12:00")]).is_err());
        assert!(validate_schedules(&[input(slot, "12:00", "10:30", "09:00")]).is_err());
        assert!(validate_schedules(&[input(slot, "9h", "10:30", "12:00")]).is_err());
        assert!(
            validate_schedules(&[
                input(TimeSlot::SundayMorning, "09:00", "10:30", "12:00"),
                input(TimeSlot::SundayMorning, "09:00", "10:30", "12:00"),
            ])
            .is_err()
        );
        assert!(validate_schedules(&[]).is_err());
    }

    #[test]
    fn test_fits_schedule() {
        let schedules = vec![Schedule {
            time_slot: TimeSlot::SaturdayMorning,
            start_time: "09:00".to_string(),
            middle_time: "10:30".to_string(),
            end_time: "12:00".to_string(),
            updated_at: chrono::Utc::now(),
        }];
        assert!(fits_schedule(TimeSlot::SaturdayMorning, "09:00", "10:30", &schedules));
        assert!(!fits_schedule(TimeSlot::SaturdayMorning, "08:30", "10:30", &schedules));
        assert!(!fits_schedule(TimeSlot::SaturdayMorning, "10:30", "12:15", &schedules));
        assert!(fits_schedule(TimeSlot::SundayMorning, "07:00", "08:00", &schedules));
    }
}
