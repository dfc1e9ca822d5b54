//! 课程存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::course_sessions::{
    ActiveModel as SessionActiveModel, Column as SessionColumn, Entity as CourseSessions,
};
use crate::entity::course_teachers::{
    ActiveModel as CourseTeacherActiveModel, Column as CourseTeacherColumn,
    Entity as CourseTeachers,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses, Model as CourseModel};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EdurootsError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseSession, CourseTeacher},
        requests::{CourseListQuery, SessionInput, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 构造新课节
fn new_session_model(course_id: i64, input: SessionInput, now: i64) -> SessionActiveModel {
    SessionActiveModel {
        course_id: Set(course_id),
        subject: Set(input.subject.to_string()),
        level: Set(input.level.trim().to_string()),
        time_slot: Set(input.time_slot.to_string()),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        classroom_number: Set(input.classroom_number),
        stats_average_attendance: Set(None),
        stats_average_grade: Set(None),
        stats_average_behavior: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

/// 写入课程教师关联
async fn insert_course_teachers<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    teacher_ids: &[i64],
    now: i64,
) -> Result<()> {
    for teacher_id in teacher_ids {
        CourseTeacherActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(*teacher_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("关联课程教师失败: {e}")))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 创建课程（课程、教师、课节在同一事务中写入）
    pub async fn create_course_impl(
        &self,
        school_year: String,
        teacher_ids: Vec<i64>,
        sessions: Vec<SessionInput>,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let course = ActiveModel {
            school_year: Set(school_year),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("创建课程失败: {e}")))?;

        insert_course_teachers(&txn, course.id, &teacher_ids, now).await?;

        for input in sessions {
            new_session_model(course.id, input, now)
                .insert(&txn)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("创建课节失败: {e}")))?;
        }

        txn.commit().await?;

        let mut courses = self.hydrate_courses(vec![course]).await?;
        courses
            .pop()
            .ok_or_else(|| EdurootsError::not_found("课程创建后未找到"))
    }

    /// 补全课程的教师与课节
    async fn hydrate_courses(&self, models: Vec<CourseModel>) -> Result<Vec<Course>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let course_ids: Vec<i64> = models.iter().map(|m| m.id).collect();

        let links = CourseTeachers::find()
            .filter(CourseTeacherColumn::CourseId.is_in(course_ids.clone()))
            .order_by_asc(CourseTeacherColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课程教师失败: {e}")))?;

        let teacher_ids: Vec<i64> = links.iter().map(|l| l.teacher_id).collect();
        let teachers: HashMap<i64, CourseTeacher> = if teacher_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(teacher_ids))
                .all(&self.db)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("查询教师失败: {e}")))?
                .into_iter()
                .map(|u| {
                    (
                        u.id,
                        CourseTeacher {
                            id: u.id,
                            firstname: u.firstname,
                            lastname: u.lastname,
                            email: u.email,
                        },
                    )
                })
                .collect()
        };

        let mut teachers_by_course: HashMap<i64, Vec<CourseTeacher>> = HashMap::new();
        for link in links {
            if let Some(teacher) = teachers.get(&link.teacher_id) {
                teachers_by_course
                    .entry(link.course_id)
                    .or_default()
                    .push(teacher.clone());
            }
        }

        let mut sessions_by_course: HashMap<i64, Vec<CourseSession>> = HashMap::new();
        let sessions = CourseSessions::find()
            .filter(SessionColumn::CourseId.is_in(course_ids))
            .order_by_asc(SessionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课节失败: {e}")))?;
        for session in sessions {
            sessions_by_course
                .entry(session.course_id)
                .or_default()
                .push(session.into_course_session());
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let teachers = teachers_by_course.remove(&m.id).unwrap_or_default();
                let sessions = sessions_by_course.remove(&m.id).unwrap_or_default();
                m.into_course(teachers, sessions)
            })
            .collect())
    }

    /// 教师关联的课程ID
    async fn teacher_course_ids(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let ids = CourseTeachers::find()
            .select_only()
            .column(CourseTeacherColumn::CourseId)
            .filter(CourseTeacherColumn::TeacherId.eq(teacher_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询教师课程失败: {e}")))?;

        Ok(ids)
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let Some(model) = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.hydrate_courses(vec![model]).await?.pop())
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Courses::find();

        if let Some(ref school_year) = query.school_year {
            select = select.filter(Column::SchoolYear.eq(school_year.as_str()));
        }

        if !query.include_inactive {
            select = select.filter(Column::IsActive.eq(true));
        }

        if let Some(teacher_id) = query.teacher_id {
            let ids = self.teacher_course_ids(teacher_id).await?;
            select = select.filter(Column::Id.is_in(ids));
        }

        select = select
            .order_by_desc(Column::SchoolYear)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课程页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: self.hydrate_courses(models).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新课程，提供 teacher_ids 时整体替换教师
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课程失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(school_year) = update.school_year {
            model.school_year = Set(school_year);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
            model.deleted_at = Set(if is_active { None } else { Some(now) });
        }
        model
            .update(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("更新课程失败: {e}")))?;

        if let Some(teacher_ids) = update.teacher_ids {
            CourseTeachers::delete_many()
                .filter(CourseTeacherColumn::CourseId.eq(course_id))
                .exec(&txn)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("移除课程教师失败: {e}")))?;
            insert_course_teachers(&txn, course_id, &teacher_ids, now).await?;
        }

        txn.commit().await?;
        self.get_course_by_id_impl(course_id).await
    }

    /// 软删除课程及其全部课节
    pub async fn soft_delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let result = Courses::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(course_id))
            .filter(Column::IsActive.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除课程失败: {e}")))?;

        CourseSessions::update_many()
            .col_expr(SessionColumn::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(SessionColumn::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(SessionColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除课节失败: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    /// 教师任教的活跃课程
    pub async fn list_teacher_courses_impl(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let ids = self.teacher_course_ids(teacher_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Courses::find()
            .filter(Column::Id.is_in(ids))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询教师课程失败: {e}")))?;

        self.hydrate_courses(models).await
    }

    pub async fn is_course_teacher_impl(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        let count = CourseTeachers::find()
            .filter(CourseTeacherColumn::CourseId.eq(course_id))
            .filter(CourseTeacherColumn::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课程教师失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn count_active_courses_impl(&self) -> Result<i64> {
        let count = Courses::find()
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("统计课程数量失败: {e}")))?;

        Ok(count as i64)
    }
}
