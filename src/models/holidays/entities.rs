use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 假期（起止日期均包含在内）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "holiday.ts")]
pub struct Holiday {
    pub id: i64,
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Holiday {
    pub fn contains(&self, date: chrono::NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
