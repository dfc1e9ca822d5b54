use super::entities::GradeType;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeRecordInput {
    pub student_id: i64,
    pub value: Option<f64>,
    #[serde(default)]
    pub is_absent: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CreateGradeRequest {
    pub date: String,
    pub grade_type: GradeType,
    #[serde(default = "default_is_draft")]
    pub is_draft: bool,
    pub records: Vec<GradeRecordInput>,
}

fn default_is_draft() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct UpdateGradeRequest {
    pub grade_type: Option<GradeType>,
    pub is_draft: Option<bool>,
    /// 提供时整体替换明细
    pub records: Option<Vec<GradeRecordInput>>,
}
