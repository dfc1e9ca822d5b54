//! 统计明细查询

use std::collections::{BTreeSet, HashMap};

use super::SeaOrmStorage;
use crate::entity::attendance_records::{
    Column as AttendanceRecordColumn, Entity as AttendanceRecords,
};
use crate::entity::attendances::{Column as AttendanceColumn, Entity as Attendances};
use crate::entity::behavior_records::{Column as BehaviorRecordColumn, Entity as BehaviorRecords};
use crate::entity::behaviors::{Column as BehaviorColumn, Entity as Behaviors};
use crate::entity::course_sessions::{Column as SessionColumn, Entity as CourseSessions};
use crate::entity::grade_records::{Column as GradeRecordColumn, Entity as GradeRecords};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::to_date;
use crate::errors::{EdurootsError, Result};
use crate::models::{
    courses::entities::Subject,
    stats::entities::{AttendanceRow, BehaviorRow, GradeRow},
};
use crate::storage::RowScope;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    pub async fn list_attendance_rows_impl(&self, scope: RowScope) -> Result<Vec<AttendanceRow>> {
        let mut select = AttendanceRecords::find()
            .find_also_related(Attendances)
            .filter(AttendanceColumn::IsActive.eq(true));
        match scope {
            RowScope::Student(id) => {
                select = select.filter(AttendanceRecordColumn::StudentId.eq(id));
            }
            RowScope::Sessions(ids) => {
                select = select.filter(AttendanceColumn::CourseSessionId.is_in(ids));
            }
            RowScope::All => {}
        }

        let rows = select
            .order_by_asc(AttendanceRecordColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询出勤明细失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(record, header)| {
                let header = header?;
                Some(AttendanceRow {
                    course_session_id: header.course_session_id,
                    student_id: record.student_id,
                    date: to_date(&header.date),
                    is_present: record.is_present,
                    is_justified: record.is_justified,
                })
            })
            .collect())
    }

    pub async fn list_behavior_rows_impl(&self, scope: RowScope) -> Result<Vec<BehaviorRow>> {
        let mut select = BehaviorRecords::find()
            .find_also_related(Behaviors)
            .filter(BehaviorColumn::IsActive.eq(true));
        match scope {
            RowScope::Student(id) => {
                select = select.filter(BehaviorRecordColumn::StudentId.eq(id));
            }
            RowScope::Sessions(ids) => {
                select = select.filter(BehaviorColumn::CourseSessionId.is_in(ids));
            }
            RowScope::All => {}
        }

        let rows = select
            .order_by_asc(BehaviorRecordColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询行为明细失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(record, header)| {
                let header = header?;
                Some(BehaviorRow {
                    course_session_id: header.course_session_id,
                    student_id: record.student_id,
                    date: to_date(&header.date),
                    rating: record.rating,
                })
            })
            .collect())
    }

    /// 成绩明细附带课节科目
    pub async fn list_grade_rows_impl(&self, scope: RowScope) -> Result<Vec<GradeRow>> {
        let mut select = GradeRecords::find()
            .find_also_related(Grades)
            .filter(GradeColumn::IsActive.eq(true));
        match scope {
            RowScope::Student(id) => {
                select = select.filter(GradeRecordColumn::StudentId.eq(id));
            }
            RowScope::Sessions(ids) => {
                select = select.filter(GradeColumn::CourseSessionId.is_in(ids));
            }
            RowScope::All => {}
        }

        let rows = select
            .order_by_asc(GradeRecordColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询成绩明细失败: {e}")))?;

        let session_ids: BTreeSet<i64> = rows
            .iter()
            .filter_map(|(_, header)| header.as_ref().map(|h| h.course_session_id))
            .collect();
        let subjects: HashMap<i64, Subject> = if session_ids.is_empty() {
            HashMap::new()
        } else {
            CourseSessions::find()
                .filter(SessionColumn::Id.is_in(session_ids))
                .all(&self.db)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("查询课节失败: {e}")))?
                .into_iter()
                .filter_map(|s| Some((s.id, s.subject.parse::<Subject>().ok()?)))
                .collect()
        };

        Ok(rows
            .into_iter()
            .filter_map(|(record, header)| {
                let header = header?;
                Some(GradeRow {
                    course_session_id: header.course_session_id,
                    student_id: record.student_id,
                    date: to_date(&header.date),
                    subject: *subjects.get(&header.course_session_id)?,
                    value: record.value,
                    is_absent: record.is_absent,
                    is_draft: header.is_draft,
                })
            })
            .collect())
    }
}
