use super::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

/// 按日期区间分页查询（出勤、行为、成绩共用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "common.ts")]
pub struct DateRangeParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// YYYY-MM-DD，含
    pub from: Option<String>,
    /// YYYY-MM-DD，含
    pub to: Option<String>,
}

// 存储层使用的记录列表查询
#[derive(Debug, Clone, Default)]
pub struct RecordListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_session_id: i64,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}
