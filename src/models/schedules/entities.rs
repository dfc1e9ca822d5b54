use crate::models::courses::entities::TimeSlot;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 时间段作息（HH:MM）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct Schedule {
    pub time_slot: TimeSlot,
    pub start_time: String,
    pub middle_time: String,
    pub end_time: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 日历中的一天
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct CalendarDay {
    pub date: chrono::NaiveDate,
    pub time_slots: Vec<TimeSlot>,
}
