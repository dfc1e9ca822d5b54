use super::entities::Holiday;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "holiday.ts")]
pub struct HolidayListResponse {
    pub items: Vec<Holiday>,
}
