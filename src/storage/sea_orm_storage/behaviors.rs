//! 行为存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::behavior_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as BehaviorRecords,
};
use crate::entity::behaviors::{ActiveModel, Column, Entity as Behaviors, Model};
use crate::entity::format_date;
use crate::errors::{EdurootsError, Result};
use crate::models::{
    PaginationInfo,
    behaviors::{entities::Behavior, requests::BehaviorRecordInput, responses::BehaviorListResponse},
    common::RecordListQuery,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

async fn insert_records<C: ConnectionTrait>(
    conn: &C,
    behavior_id: i64,
    records: Vec<BehaviorRecordInput>,
) -> Result<()> {
    for record in records {
        RecordActiveModel {
            behavior_id: Set(behavior_id),
            student_id: Set(record.student_id),
            rating: Set(record.rating),
            comment: Set(record.comment),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("写入行为明细失败: {e}")))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    async fn load_behaviors(&self, headers: Vec<Model>) -> Result<Vec<Behavior>> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = headers.iter().map(|h| h.id).collect();
        let records = BehaviorRecords::find()
            .filter(RecordColumn::BehaviorId.is_in(ids))
            .order_by_asc(RecordColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为明细失败: {e}")))?;

        let mut grouped: HashMap<i64, Vec<_>> = HashMap::new();
        for record in records {
            grouped.entry(record.behavior_id).or_default().push(record);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let own = grouped.remove(&header.id).unwrap_or_default();
                header.into_behavior(own)
            })
            .collect())
    }

    /// 创建行为表及明细（单事务）
    pub async fn create_behavior_impl(
        &self,
        session_id: i64,
        date: NaiveDate,
        created_by: i64,
        behavior_average: f64,
        records: Vec<BehaviorRecordInput>,
    ) -> Result<Behavior> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        // 同一课节同一天只允许一张有效行为表
        let existing = Behaviors::find()
            .filter(Column::CourseSessionId.eq(session_id))
            .filter(Column::Date.eq(format_date(date)))
            .filter(Column::IsActive.eq(true))
            .count(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为表失败: {e}")))?;
        if existing > 0 {
            return Err(EdurootsError::conflict(format!(
                "课节 {session_id} 在 {date} 已有行为表"
            )));
        }

        let header = ActiveModel {
            course_session_id: Set(session_id),
            date: Set(format_date(date)),
            total_students: Set(records.len() as i32),
            behavior_average: Set(behavior_average),
            created_by: Set(created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("创建行为表失败: {e}")))?;

        insert_records(&txn, header.id, records).await?;
        txn.commit().await?;

        self.get_behavior_by_id_impl(header.id)
            .await?
            .ok_or_else(|| EdurootsError::not_found("行为表创建后未找到"))
    }

    pub async fn get_behavior_by_id_impl(&self, id: i64) -> Result<Option<Behavior>> {
        let Some(header) = Behaviors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为表失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.load_behaviors(vec![header]).await?.pop())
    }

    pub async fn behavior_exists_impl(&self, session_id: i64, date: NaiveDate) -> Result<bool> {
        let count = Behaviors::find()
            .filter(Column::CourseSessionId.eq(session_id))
            .filter(Column::Date.eq(format_date(date)))
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为表失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出课节的活跃行为表，日期倒序
    pub async fn list_behaviors_with_pagination_impl(
        &self,
        query: RecordListQuery,
    ) -> Result<BehaviorListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Behaviors::find()
            .filter(Column::CourseSessionId.eq(query.course_session_id))
            .filter(Column::IsActive.eq(true));
        if let Some(from) = query.from {
            select = select.filter(Column::Date.gte(format_date(from)));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::Date.lte(format_date(to)));
        }
        select = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为页数失败: {e}")))?;
        let headers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为列表失败: {e}")))?;

        Ok(BehaviorListResponse {
            items: self.load_behaviors(headers).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 整体替换行为明细
    pub async fn replace_behavior_records_impl(
        &self,
        id: i64,
        behavior_average: f64,
        records: Vec<BehaviorRecordInput>,
    ) -> Result<Option<Behavior>> {
        if self.get_behavior_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        BehaviorRecords::delete_many()
            .filter(RecordColumn::BehaviorId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除行为明细失败: {e}")))?;

        ActiveModel {
            id: Set(id),
            total_students: Set(records.len() as i32),
            behavior_average: Set(behavior_average),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("更新行为表失败: {e}")))?;

        insert_records(&txn, id, records).await?;
        txn.commit().await?;

        self.get_behavior_by_id_impl(id).await
    }

    pub async fn soft_delete_behavior_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Behaviors::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除行为表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
