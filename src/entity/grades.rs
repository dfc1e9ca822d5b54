//! 成绩表头实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_session_id: i64,
    pub date: String,
    pub grade_type: String,
    pub is_draft: bool,
    pub created_by: i64,
    pub is_active: bool,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_sessions::Entity",
        from = "Column::CourseSessionId",
        to = "super::course_sessions::Column::Id"
    )]
    CourseSession,
    #[sea_orm(has_many = "super::grade_records::Entity")]
    GradeRecords,
}

impl Related<super::course_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSession.def()
    }
}

impl Related<super::grade_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(
        self,
        records: Vec<super::grade_records::Model>,
    ) -> crate::models::grades::entities::Grade {
        use crate::models::grades::entities::{Grade, GradeRecord, GradeType};

        Grade {
            id: self.id,
            course_session_id: self.course_session_id,
            date: super::to_date(&self.date),
            grade_type: self
                .grade_type
                .parse::<GradeType>()
                .unwrap_or(GradeType::Controle),
            is_draft: self.is_draft,
            created_by: self.created_by,
            is_active: self.is_active,
            deleted_at: self.deleted_at.map(super::to_datetime),
            records: records
                .into_iter()
                .map(|r| GradeRecord {
                    id: r.id,
                    grade_id: r.grade_id,
                    student_id: r.student_id,
                    value: r.value,
                    is_absent: r.is_absent,
                    comment: r.comment,
                })
                .collect(),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
