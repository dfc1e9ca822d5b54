use crate::models::courses::entities::TimeSlot;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleInput {
    pub time_slot: TimeSlot,
    pub start_time: String,
    pub middle_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct UpdateSchedulesRequest {
    pub schedules: Vec<ScheduleInput>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct CalendarParams {
    /// YYYY-MM-DD，默认今天
    pub from: Option<String>,
    /// 1..=52，默认 10
    pub count: Option<u32>,
}
