use crate::models::courses::entities::Subject;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 统计输入行：学生的一条出勤记录
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub course_session_id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub is_present: bool,
    pub is_justified: bool,
}

// 统计输入行：一条行为评分
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorRow {
    pub course_session_id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub rating: i32,
}

// 统计输入行：一条成绩（附带表头的科目与草稿标记）
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow {
    pub course_session_id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub subject: Subject,
    pub value: Option<f64>,
    pub is_absent: bool,
    pub is_draft: bool,
}

// 成绩平均值
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct GradeAverages {
    pub overall: Option<f64>,
    pub by_subject: std::collections::BTreeMap<Subject, f64>,
}

// 学生统计
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct StudentStats {
    pub student_id: i64,
    pub total_sessions_recorded: i64,
    pub absences_count: i64,
    pub justified_absences_count: i64,
    pub attendance_rate: f64,
    pub behavior_average: Option<f64>,
    pub grades: GradeAverages,
    pub is_high_risk: bool,
    pub last_activity: Option<chrono::NaiveDate>,
}

// 单个课节统计
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct SessionStats {
    pub session_id: i64,
    pub course_id: i64,
    pub subject: Subject,
    pub level: String,
    pub time_slot: crate::models::courses::entities::TimeSlot,
    pub start_time: String,
    pub student_count: i64,
    pub attendance_rate: f64,
    pub behavior_average: Option<f64>,
    pub grade_average: Option<f64>,
}

// 教师统计
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct TeacherStats {
    pub teacher_id: i64,
    pub total_courses: i64,
    pub total_sessions: i64,
    pub total_students: i64,
    pub attendance_rate: f64,
    pub behavior_average: Option<f64>,
    pub grade_average: Option<f64>,
    pub sessions: Vec<SessionStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct HighRiskStudent {
    pub student_id: i64,
    pub firstname: String,
    pub lastname: String,
    pub absences: i64,
}

// 管理员仪表盘
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct DashboardStats {
    pub active_students: i64,
    pub active_teachers: i64,
    pub active_courses: i64,
    pub active_sessions: i64,
    pub attendance_rate: f64,
    pub high_risk_students: Vec<HighRiskStudent>,
}
