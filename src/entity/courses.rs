//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_year: String,
    pub is_active: bool,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_teachers::Entity")]
    CourseTeachers,
    #[sea_orm(has_many = "super::course_sessions::Entity")]
    CourseSessions,
}

impl Related<super::course_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTeachers.def()
    }
}

impl Related<super::course_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 教师与课节由存储层另行查询后传入
    pub fn into_course(
        self,
        teachers: Vec<crate::models::courses::entities::CourseTeacher>,
        sessions: Vec<crate::models::courses::entities::CourseSession>,
    ) -> crate::models::courses::entities::Course {
        crate::models::courses::entities::Course {
            id: self.id,
            school_year: self.school_year,
            is_active: self.is_active,
            deleted_at: self.deleted_at.map(super::to_datetime),
            teachers,
            sessions,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
