//! 课节与选课存储操作

use std::collections::BTreeSet;

use super::SeaOrmStorage;
use crate::entity::course_session_students::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn,
    Entity as CourseSessionStudents,
};
use crate::entity::course_sessions::{ActiveModel, Column, Entity as CourseSessions};
use crate::entity::course_teachers::{Column as CourseTeacherColumn, Entity as CourseTeachers};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EdurootsError, Result};
use crate::models::{
    courses::{
        entities::{CourseSession, SessionStatsSnapshot},
        requests::UpdateSessionRequest,
        responses::EnrollStudentsResponse,
    },
    users::entities::User,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn get_session_by_id_impl(&self, session_id: i64) -> Result<Option<CourseSession>> {
        let result = CourseSessions::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课节失败: {e}")))?;

        Ok(result.map(|m| m.into_course_session()))
    }

    pub async fn update_session_impl(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<Option<CourseSession>> {
        if self.get_session_by_id_impl(session_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(session_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(subject) = update.subject {
            model.subject = Set(subject.to_string());
        }
        if let Some(level) = update.level {
            model.level = Set(level.trim().to_string());
        }
        if let Some(time_slot) = update.time_slot {
            model.time_slot = Set(time_slot.to_string());
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }
        if let Some(classroom_number) = update.classroom_number {
            model.classroom_number = Set(Some(classroom_number));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("更新课节失败: {e}")))?;

        Ok(Some(result.into_course_session()))
    }

    /// 写入课节缓存统计
    pub async fn update_session_stats_impl(
        &self,
        session_id: i64,
        stats: SessionStatsSnapshot,
    ) -> Result<bool> {
        let model = ActiveModel {
            id: Set(session_id),
            stats_average_attendance: Set(stats.average_attendance),
            stats_average_grade: Set(stats.average_grade),
            stats_average_behavior: Set(stats.average_behavior),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(sea_orm::DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(EdurootsError::database_operation(format!(
                "更新课节统计失败: {e}"
            ))),
        }
    }

    /// 学生选课，已选的学生跳过
    pub async fn enroll_students_impl(
        &self,
        session_id: i64,
        student_ids: Vec<i64>,
    ) -> Result<EnrollStudentsResponse> {
        let existing: BTreeSet<i64> = self
            .list_session_student_ids_impl(session_id)
            .await?
            .into_iter()
            .collect();
        let requested: BTreeSet<i64> = student_ids.into_iter().collect();

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;
        let mut enrolled = 0;
        for student_id in requested.difference(&existing) {
            EnrollmentActiveModel {
                course_session_id: Set(session_id),
                student_id: Set(*student_id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("学生选课失败: {e}")))?;
            enrolled += 1;
        }
        txn.commit().await?;

        Ok(EnrollStudentsResponse {
            enrolled,
            already_enrolled: requested.intersection(&existing).count() as i64,
        })
    }

    pub async fn unenroll_student_impl(&self, session_id: i64, student_id: i64) -> Result<bool> {
        let result = CourseSessionStudents::delete_many()
            .filter(EnrollmentColumn::CourseSessionId.eq(session_id))
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("学生退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_session_student_ids_impl(&self, session_id: i64) -> Result<Vec<i64>> {
        let ids = CourseSessionStudents::find()
            .select_only()
            .column(EnrollmentColumn::StudentId)
            .filter(EnrollmentColumn::CourseSessionId.eq(session_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课节学生失败: {e}")))?;

        Ok(ids)
    }

    /// 课节内的活跃学生，按姓名排序
    pub async fn list_session_students_impl(&self, session_id: i64) -> Result<Vec<User>> {
        let ids = self.list_session_student_ids_impl(session_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(ids))
            .filter(UserColumn::IsActive.eq(true))
            .order_by_asc(UserColumn::Lastname)
            .order_by_asc(UserColumn::Firstname)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询课节学生失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    pub async fn list_student_sessions_impl(&self, student_id: i64) -> Result<Vec<CourseSession>> {
        let session_ids = CourseSessionStudents::find()
            .select_only()
            .column(EnrollmentColumn::CourseSessionId)
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询学生课节失败: {e}")))?;
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sessions = CourseSessions::find()
            .filter(Column::Id.is_in(session_ids))
            .filter(Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询学生课节失败: {e}")))?;

        Ok(sessions
            .into_iter()
            .map(|m| m.into_course_session())
            .collect())
    }

    /// 教师任教课节中的学生（去重）
    pub async fn list_teacher_student_ids_impl(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let course_ids = CourseTeachers::find()
            .select_only()
            .column(CourseTeacherColumn::CourseId)
            .filter(CourseTeacherColumn::TeacherId.eq(teacher_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询教师课程失败: {e}")))?;
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let session_ids = CourseSessions::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::CourseId.is_in(course_ids))
            .filter(Column::IsActive.eq(true))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询教师课节失败: {e}")))?;
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids = CourseSessionStudents::find()
            .select_only()
            .column(EnrollmentColumn::StudentId)
            .distinct()
            .filter(EnrollmentColumn::CourseSessionId.is_in(session_ids))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询教师学生失败: {e}")))?;

        Ok(student_ids)
    }

    pub async fn count_active_sessions_impl(&self) -> Result<i64> {
        let count = CourseSessions::find()
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("统计课节数量失败: {e}")))?;

        Ok(count as i64)
    }
}
