//! 出勤表头实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_session_id: i64,
    pub date: String,
    pub total_students: i32,
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
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
}

impl Related<super::course_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSession.def()
    }
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance(
        self,
        records: Vec<super::attendance_records::Model>,
    ) -> crate::models::attendances::entities::Attendance {
        crate::models::attendances::entities::Attendance {
            id: self.id,
            course_session_id: self.course_session_id,
            date: super::to_date(&self.date),
            total_students: self.total_students,
            created_by: self.created_by,
            is_active: self.is_active,
            deleted_at: self.deleted_at.map(super::to_datetime),
            records: records
                .into_iter()
                .map(|r| r.into_attendance_record())
                .collect(),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
