use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 出勤明细
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub attendance_id: i64,
    pub student_id: i64,
    pub is_present: bool,
    pub is_justified: bool,
    pub comment: Option<String>,
}

// 出勤表（某课节某一天）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub course_session_id: i64,
    pub date: chrono::NaiveDate,
    pub total_students: i32,
    pub created_by: i64,
    pub is_active: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub records: Vec<AttendanceRecord>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
