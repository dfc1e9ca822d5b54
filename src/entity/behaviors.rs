//! 行为表头实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "behaviors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_session_id: i64,
    pub date: String,
    pub total_students: i32,
    #[sea_orm(column_type = "Double")]
    pub behavior_average: f64,
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
    #[sea_orm(has_many = "super::behavior_records::Entity")]
    BehaviorRecords,
}

impl Related<super::course_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSession.def()
    }
}

impl Related<super::behavior_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BehaviorRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_behavior(
        self,
        records: Vec<super::behavior_records::Model>,
    ) -> crate::models::behaviors::entities::Behavior {
        use crate::models::behaviors::entities::{Behavior, BehaviorRecord};

        Behavior {
            id: self.id,
            course_session_id: self.course_session_id,
            date: super::to_date(&self.date),
            total_students: self.total_students,
            behavior_average: self.behavior_average,
            created_by: self.created_by,
            is_active: self.is_active,
            deleted_at: self.deleted_at.map(super::to_datetime),
            records: records
                .into_iter()
                .map(|r| BehaviorRecord {
                    id: r.id,
                    behavior_id: r.behavior_id,
                    student_id: r.student_id,
                    rating: r.rating,
                    comment: r.comment,
                })
                .collect(),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
