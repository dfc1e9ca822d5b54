use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::ObjectCache;
use crate::errors::Result;
use crate::models::courses::entities::SessionStatsSnapshot;
use crate::storage::{RowScope, Storage};

use super::compute::{attendance_rate, behavior_rows_average, grade_averages};
use super::{student_stats_key, teacher_stats_key};

/// 重新计算课节的三项平均值并写回
pub async fn recompute_session_stats(
    storage: &Arc<dyn Storage>,
    session_id: i64,
) -> Result<SessionStatsSnapshot> {
    let scope = RowScope::Sessions(vec![session_id]);
    let attendances = storage.list_attendance_rows(scope.clone()).await?;
    let behaviors = storage.list_behavior_rows(scope.clone()).await?;
    let grades = storage.list_grade_rows(scope).await?;

    let snapshot = SessionStatsSnapshot {
        average_attendance: (!attendances.is_empty()).then(|| attendance_rate(&attendances)),
        average_grade: grade_averages(&grades).overall,
        average_behavior: behavior_rows_average(&behaviors),
    };
    storage
        .update_session_stats(session_id, snapshot.clone())
        .await?;
    Ok(snapshot)
}

/// 记录写入后的收尾：刷新课节统计并清除受影响的学生与教师缓存
///
/// 失败只记日志，不影响已经成功的写入。
pub async fn after_records_changed(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    session_id: i64,
    student_ids: &[i64],
) {
    match recompute_session_stats(storage, session_id).await {
        Ok(snapshot) => debug!("Session {} stats refreshed: {:?}", session_id, snapshot),
        Err(e) => warn!("Failed to refresh stats of session {}: {}", session_id, e),
    }

    for student_id in student_ids {
        cache.remove(&student_stats_key(*student_id)).await;
    }

    evict_session_teachers(storage, cache, session_id).await;
}

/// 清除课节所属课程全部教师的统计缓存（选课变化时使用）
pub async fn evict_session_teachers(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    session_id: i64,
) {
    let course_id = match storage.get_session_by_id(session_id).await {
        Ok(Some(session)) => session.course_id,
        Ok(None) => return,
        Err(e) => {
            warn!("Failed to load session {}: {}", session_id, e);
            return;
        }
    };
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => {
            for teacher in &course.teachers {
                cache.remove(&teacher_stats_key(teacher.id)).await;
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Failed to load course {}: {}", course_id, e),
    }
}

/// 课程结构变化会波及多名教师与学生，直接清空整个缓存
pub async fn invalidate_all_stats(cache: &Arc<dyn ObjectCache>) {
    cache.invalidate_all().await;
    debug!("Object cache invalidated after course change");
}
