//! 假期存储操作

use super::SeaOrmStorage;
use crate::entity::format_date;
use crate::entity::holidays::{ActiveModel, Column, Entity as Holidays};
use crate::errors::{EdurootsError, Result};
use crate::models::holidays::entities::Holiday;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_holiday_impl(
        &self,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Holiday> {
        let now = chrono::Utc::now().timestamp();

        let result = ActiveModel {
            name: Set(name),
            start_date: Set(format_date(start_date)),
            end_date: Set(format_date(end_date)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("创建假期失败: {e}")))?;

        Ok(result.into_holiday())
    }

    pub async fn get_holiday_by_id_impl(&self, id: i64) -> Result<Option<Holiday>> {
        let result = Holidays::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询假期失败: {e}")))?;

        Ok(result.map(|m| m.into_holiday()))
    }

    /// 按开始日期升序
    pub async fn list_holidays_impl(&self, include_inactive: bool) -> Result<Vec<Holiday>> {
        let mut select = Holidays::find();
        if !include_inactive {
            select = select.filter(Column::IsActive.eq(true));
        }

        let result = select
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询假期列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_holiday()).collect())
    }

    pub async fn update_holiday_impl(&self, holiday: Holiday) -> Result<Option<Holiday>> {
        if self.get_holiday_by_id_impl(holiday.id).await?.is_none() {
            return Ok(None);
        }

        let result = ActiveModel {
            id: Set(holiday.id),
            name: Set(holiday.name),
            start_date: Set(format_date(holiday.start_date)),
            end_date: Set(format_date(holiday.end_date)),
            is_active: Set(holiday.is_active),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("更新假期失败: {e}")))?;

        Ok(Some(result.into_holiday()))
    }

    pub async fn soft_delete_holiday_impl(&self, id: i64) -> Result<bool> {
        let result = Holidays::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除假期失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
