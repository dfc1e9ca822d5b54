use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "behavior.ts")]
pub struct BehaviorRecordInput {
    pub student_id: i64,
    /// 1..=5
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "behavior.ts")]
pub struct CreateBehaviorRequest {
    pub date: String,
    pub records: Vec<BehaviorRecordInput>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "behavior.ts")]
pub struct UpdateBehaviorRequest {
    pub records: Vec<BehaviorRecordInput>,
}
