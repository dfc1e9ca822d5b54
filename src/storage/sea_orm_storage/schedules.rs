//! 作息存储操作

use super::SeaOrmStorage;
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{EdurootsError, Result};
use crate::models::schedules::{entities::Schedule, requests::ScheduleInput};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 按一周内时间段顺序返回
    pub async fn list_schedules_impl(&self) -> Result<Vec<Schedule>> {
        let models = Schedules::find()
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询作息失败: {e}")))?;

        let mut schedules: Vec<Schedule> =
            models.into_iter().filter_map(|m| m.into_schedule()).collect();
        schedules.sort_by_key(|s| s.time_slot.rank());
        Ok(schedules)
    }

    /// 逐个时间段写入，不存在则插入
    pub async fn replace_schedules_impl(
        &self,
        schedules: Vec<ScheduleInput>,
    ) -> Result<Vec<Schedule>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        for input in schedules {
            let existing = Schedules::find()
                .filter(Column::TimeSlot.eq(input.time_slot.to_string()))
                .one(&txn)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("查询作息失败: {e}")))?;

            let mut model = match existing {
                Some(m) => {
                    let mut active: ActiveModel = m.into();
                    active.updated_at = Set(now);
                    active
                }
                None => ActiveModel {
                    time_slot: Set(input.time_slot.to_string()),
                    updated_at: Set(now),
                    ..Default::default()
                },
            };
            model.start_time = Set(input.start_time);
            model.middle_time = Set(input.middle_time);
            model.end_time = Set(input.end_time);

            model
                .save(&txn)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("保存作息失败: {e}")))?;
        }

        txn.commit().await?;
        self.list_schedules_impl().await
    }
}
