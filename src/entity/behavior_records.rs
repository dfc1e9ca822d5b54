//! 行为明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "behavior_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub behavior_id: i64,
    pub student_id: i64,
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::behaviors::Entity",
        from = "Column::BehaviorId",
        to = "super::behaviors::Column::Id"
    )]
    Behavior,
}

impl Related<super::behaviors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Behavior.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
