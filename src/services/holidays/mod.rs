pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::models::holidays::entities::Holiday;
use crate::models::holidays::requests::{
    CreateHolidayRequest, HolidayListParams, UpdateHolidayRequest,
};
use crate::storage::Storage;
use crate::utils::validate::parse_date;

pub struct HolidayService {
    storage: Option<Arc<dyn Storage>>,
}

impl HolidayService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn list_holidays(
        &self,
        request: &HttpRequest,
        query: HolidayListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_holidays(self, request, query).await
    }

    pub async fn list_upcoming(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_upcoming(self, request).await
    }

    pub async fn create_holiday(
        &self,
        request: &HttpRequest,
        body: CreateHolidayRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_holiday(self, request, body).await
    }

    pub async fn update_holiday(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateHolidayRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_holiday(self, request, id, body).await
    }

    pub async fn delete_holiday(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_holiday(self, request, id).await
    }
}

/// 日期是否落在任一活跃假期内（含首尾）
pub fn is_holiday(date: NaiveDate, holidays: &[Holiday]) -> bool {
    holidays.iter().any(|h| h.is_active && h.contains(date))
}

/// 校验假期名称与日期区间
pub fn validate_holiday(
    name: &str,
    start_date: &str,
    end_date: &str,
) -> Result<(String, NaiveDate, NaiveDate), String> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err("nom du congé invalide".to_string());
    }
    let start = parse_date(start_date).map_err(str::to_string)?;
    let end = parse_date(end_date).map_err(str::to_string)?;
    if start > end {
        return Err("la date de début doit précéder la date de fin".to_string());
    }
    Ok((name.to_string(), start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holiday(start: &str, end: &str, active: bool) -> Holiday {
        let now = chrono::Utc::now();
        Holiday {
            id: 1,
            name: "Noël".to_string(),
            start_date: parse_date(start).unwrap(),
            end_date: parse_date(end).unwrap(),
            is_active: active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_holiday_inclusive_range() {
        let holidays = vec![holiday("2025-12-20", "2026-01-04", true)];
        assert!(is_holiday(parse_date("2025-12-20").unwrap(), &holidays));
        assert!(is_holiday(parse_date("2026-01-04").unwrap(), &holidays));
        assert!(!is_holiday(parse_date("2026-01-05").unwrap(), &holidays));
    }

    #[test]
    fn test_inactive_holiday_ignored() {
        let holidays = vec![holiday("2025-12-20", "2026-01-04", false)];
        assert!(!is_holiday(parse_date("2025-12-25").unwrap(), &holidays));
    }

    #[test]
    fn test_validate_holiday() {
        assert!(validate_holiday("Toussaint", "2025-10-18", "2025-11-02").is_ok());
        assert!(validate_holiday("Toussaint", "2025-11-02", "2025-10-18").is_err());
        assert!(validate_holiday("  ", "2025-10-18", "2025-11-02").is_err());
        assert!(validate_holiday("Toussaint", "18/10/2025", "2025-11-02").is_err());
        // 单日假期
        assert!(validate_holiday("Aïd", "2026-03-20", "2026-03-20").is_ok());
    }
}
