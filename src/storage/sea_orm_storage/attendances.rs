//! 出勤存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::attendance_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as AttendanceRecords,
};
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances, Model};
use crate::entity::format_date;
use crate::errors::{EdurootsError, Result};
use crate::models::{
    PaginationInfo,
    attendances::{
        entities::Attendance, requests::AttendanceRecordInput, responses::AttendanceListResponse,
    },
    common::RecordListQuery,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

async fn insert_records<C: ConnectionTrait>(
    conn: &C,
    attendance_id: i64,
    records: Vec<AttendanceRecordInput>,
) -> Result<()> {
    for record in records {
        RecordActiveModel {
            attendance_id: Set(attendance_id),
            student_id: Set(record.student_id),
            is_present: Set(record.is_present),
            // 出席时不存在是否请假
            is_justified: Set(!record.is_present && record.is_justified),
            comment: Set(record.comment),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("写入出勤明细失败: {e}")))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    async fn load_attendances(&self, headers: Vec<Model>) -> Result<Vec<Attendance>> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = headers.iter().map(|h| h.id).collect();
        let records = AttendanceRecords::find()
            .filter(RecordColumn::AttendanceId.is_in(ids))
            .order_by_asc(RecordColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤明细失败: {e}")))?;

        let mut grouped: HashMap<i64, Vec<_>> = HashMap::new();
        for record in records {
            grouped.entry(record.attendance_id).or_default().push(record);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let own = grouped.remove(&header.id).unwrap_or_default();
                header.into_attendance(own)
            })
            .collect())
    }

    /// 创建出勤表及明细（单事务）
    pub async fn create_attendance_impl(
        &self,
        session_id: i64,
        date: NaiveDate,
        created_by: i64,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        // 同一课节同一天只允许一张有效出勤表
        let existing = Attendances::find()
            .filter(Column::CourseSessionId.eq(session_id))
            .filter(Column::Date.eq(format_date(date)))
            .filter(Column::IsActive.eq(true))
            .count(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤表失败: {e}")))?;
        if existing > 0 {
            return Err(EdurootsError::conflict(format!(
                "课节 {session_id} 在 {date} 已有出勤表"
            )));
        }

        let header = ActiveModel {
            course_session_id: Set(session_id),
            date: Set(format_date(date)),
            total_students: Set(records.len() as i32),
            created_by: Set(created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("创建出勤表失败: {e}")))?;

        insert_records(&txn, header.id, records).await?;
        txn.commit().await?;

        self.get_attendance_by_id_impl(header.id)
            .await?
            .ok_or_else(|| EdurootsError::not_found("出勤表创建后未找到"))
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let Some(header) = Attendances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤表失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.load_attendances(vec![header]).await?.pop())
    }

    pub async fn attendance_exists_impl(&self, session_id: i64, date: NaiveDate) -> Result<bool> {
        let count = Attendances::find()
            .filter(Column::CourseSessionId.eq(session_id))
            .filter(Column::Date.eq(format_date(date)))
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤表失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出课节的活跃出勤表，日期倒序
    pub async fn list_attendances_with_pagination_impl(
        &self,
        query: RecordListQuery,
    ) -> Result<AttendanceListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Attendances::find()
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
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤页数失败: {e}")))?;
        let headers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤列表失败: {e}")))?;

        Ok(AttendanceListResponse {
            items: self.load_attendances(headers).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 整体替换出勤明细
    pub async fn replace_attendance_records_impl(
        &self,
        id: i64,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Option<Attendance>> {
        if self.get_attendance_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        AttendanceRecords::delete_many()
            .filter(RecordColumn::AttendanceId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除出勤明细失败: {e}")))?;

        ActiveModel {
            id: Set(id),
            total_students: Set(records.len() as i32),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("更新出勤表失败: {e}")))?;

        insert_records(&txn, id, records).await?;
        txn.commit().await?;

        self.get_attendance_by_id_impl(id).await
    }

    pub async fn soft_delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Attendances::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除出勤表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
