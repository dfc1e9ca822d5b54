//! 成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::format_date;
use crate::entity::grade_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as GradeRecords,
};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades, Model};
use crate::errors::{EdurootsError, Result};
use crate::models::{
    PaginationInfo,
    common::RecordListQuery,
    grades::{
        entities::{Grade, GradeType},
        requests::GradeRecordInput,
        responses::GradeListResponse,
    },
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

async fn insert_records<C: ConnectionTrait>(
    conn: &C,
    grade_id: i64,
    records: Vec<GradeRecordInput>,
) -> Result<()> {
    for record in records {
        RecordActiveModel {
            grade_id: Set(grade_id),
            student_id: Set(record.student_id),
            // 缺考不记分
            value: Set(if record.is_absent { None } else { record.value }),
            is_absent: Set(record.is_absent),
            comment: Set(record.comment),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("写入成绩明细失败: {e}")))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    async fn load_grades(&self, headers: Vec<Model>) -> Result<Vec<Grade>> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = headers.iter().map(|h| h.id).collect();
        let records = GradeRecords::find()
            .filter(RecordColumn::GradeId.is_in(ids))
            .order_by_asc(RecordColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询成绩明细失败: {e}")))?;

        let mut grouped: HashMap<i64, Vec<_>> = HashMap::new();
        for record in records {
            grouped.entry(record.grade_id).or_default().push(record);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let own = grouped.remove(&header.id).unwrap_or_default();
                header.into_grade(own)
            })
            .collect())
    }

    /// 创建成绩表及明细（单事务）
    pub async fn create_grade_impl(
        &self,
        session_id: i64,
        date: NaiveDate,
        grade_type: GradeType,
        is_draft: bool,
        created_by: i64,
        records: Vec<GradeRecordInput>,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let header = ActiveModel {
            course_session_id: Set(session_id),
            date: Set(format_date(date)),
            grade_type: Set(grade_type.to_string()),
            is_draft: Set(is_draft),
            created_by: Set(created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("创建成绩表失败: {e}")))?;

        insert_records(&txn, header.id, records).await?;
        txn.commit().await?;

        self.get_grade_by_id_impl(header.id)
            .await?
            .ok_or_else(|| EdurootsError::not_found("成绩表创建后未找到"))
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let Some(header) = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询成绩表失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.load_grades(vec![header]).await?.pop())
    }

    /// 分页列出课节的活跃成绩表，日期倒序
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: RecordListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Grades::find()
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
            .map_err(|e| EdurootsError::database_operation(format!("查询成绩总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询成绩页数失败: {e}")))?;
        let headers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: self.load_grades(headers).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新成绩表，提供 records 时整体替换明细
    pub async fn update_grade_impl(
        &self,
        id: i64,
        grade_type: Option<GradeType>,
        is_draft: Option<bool>,
        records: Option<Vec<GradeRecordInput>>,
    ) -> Result<Option<Grade>> {
        if self.get_grade_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(grade_type) = grade_type {
            model.grade_type = Set(grade_type.to_string());
        }
        if let Some(is_draft) = is_draft {
            model.is_draft = Set(is_draft);
        }
        model
            .update(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("更新成绩表失败: {e}")))?;

        if let Some(records) = records {
            GradeRecords::delete_many()
                .filter(RecordColumn::GradeId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("删除成绩明细失败: {e}")))?;
            insert_records(&txn, id, records).await?;
        }

        txn.commit().await?;
        self.get_grade_by_id_impl(id).await
    }

    pub async fn soft_delete_grade_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Grades::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除成绩表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
