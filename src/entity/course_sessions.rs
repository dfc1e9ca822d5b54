//! 课节实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub subject: String,
    pub level: String,
    pub time_slot: String,
    pub start_time: String,
    pub end_time: String,
    pub classroom_number: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub stats_average_attendance: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub stats_average_grade: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub stats_average_behavior: Option<f64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::course_session_students::Entity")]
    CourseSessionStudents,
    #[sea_orm(has_many = "super::attendances::Entity")]
    Attendances,
    #[sea_orm(has_many = "super::behaviors::Entity")]
    Behaviors,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::course_session_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSessionStudents.def()
    }
}

impl Related<super::attendances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

impl Related<super::behaviors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Behaviors.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course_session(self) -> crate::models::courses::entities::CourseSession {
        use crate::models::courses::entities::{
            CourseSession, SessionStatsSnapshot, Subject, TimeSlot,
        };

        CourseSession {
            id: self.id,
            course_id: self.course_id,
            subject: self.subject.parse::<Subject>().unwrap_or(Subject::Arabic),
            level: self.level,
            time_slot: self
                .time_slot
                .parse::<TimeSlot>()
                .unwrap_or(TimeSlot::SaturdayMorning),
            start_time: self.start_time,
            end_time: self.end_time,
            classroom_number: self.classroom_number,
            stats: SessionStatsSnapshot {
                average_attendance: self.stats_average_attendance,
                average_grade: self.stats_average_grade,
                average_behavior: self.stats_average_behavior,
            },
            is_active: self.is_active,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
