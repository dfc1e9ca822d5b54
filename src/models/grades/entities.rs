use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 成绩满分
pub const MAX_GRADE_VALUE: f64 = 20.0;

// 评估类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "grade.ts")]
pub enum GradeType {
    Controle,
    Devoir,
    Examen,
    Oral,
}

impl std::fmt::Display for GradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeType::Controle => write!(f, "controle"),
            GradeType::Devoir => write!(f, "devoir"),
            GradeType::Examen => write!(f, "examen"),
            GradeType::Oral => write!(f, "oral"),
        }
    }
}

impl std::str::FromStr for GradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "controle" => Ok(GradeType::Controle),
            "devoir" => Ok(GradeType::Devoir),
            "examen" => Ok(GradeType::Examen),
            "oral" => Ok(GradeType::Oral),
            _ => Err(format!("Invalid grade type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeRecord {
    pub id: i64,
    pub grade_id: i64,
    pub student_id: i64,
    /// 缺考时为空
    pub value: Option<f64>,
    pub is_absent: bool,
    pub comment: Option<String>,
}

// 成绩表（一次评估）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub course_session_id: i64,
    pub date: chrono::NaiveDate,
    pub grade_type: GradeType,
    /// 草稿不参与任何统计
    pub is_draft: bool,
    pub created_by: i64,
    pub is_active: bool,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub records: Vec<GradeRecord>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
