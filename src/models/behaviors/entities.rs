use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 行为评分下限
pub const MIN_RATING: i32 = 1;
/// 行为评分上限
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "behavior.ts")]
pub struct BehaviorRecord {
    pub id: i64,
    pub behavior_id: i64,
    pub student_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
}

// 行为评价表（某课节某一天）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "behavior.ts")]
pub struct Behavior {
    pub id: i64,
    pub course_session_id: i64,
    pub date: chrono::NaiveDate,
    pub total_students: i32,
    pub behavior_average: f64,
    pub created_by: i64,
    pub is_active: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub records: Vec<BehaviorRecord>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
