//! 时间段作息实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub time_slot: String,
    pub start_time: String,
    pub middle_time: String,
    pub end_time: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 未知时间段返回 None
    pub fn into_schedule(self) -> Option<crate::models::schedules::entities::Schedule> {
        Some(crate::models::schedules::entities::Schedule {
            time_slot: self.time_slot.parse().ok()?,
            start_time: self.start_time,
            middle_time: self.middle_time,
            end_time: self.end_time,
            updated_at: super::to_datetime(self.updated_at),
        })
    }
}
