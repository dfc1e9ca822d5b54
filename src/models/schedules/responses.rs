use super::entities::{CalendarDay, Schedule};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleListResponse {
    pub items: Vec<Schedule>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct CalendarResponse {
    pub from: chrono::NaiveDate,
    pub days: Vec<CalendarDay>,
}
