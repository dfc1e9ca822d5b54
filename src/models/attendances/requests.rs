use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceRecordInput {
    pub student_id: i64,
    pub is_present: bool,
    #[serde(default)]
    pub is_justified: bool,
    pub comment: Option<String>,
}

// 创建出勤请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct CreateAttendanceRequest {
    /// YYYY-MM-DD
    pub date: String,
    pub records: Vec<AttendanceRecordInput>,
}

// 更新出勤请求（整体替换明细）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub records: Vec<AttendanceRecordInput>,
}
