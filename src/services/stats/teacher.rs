use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cache;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::stats::entities::{SessionStats, TeacherStats};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::schedules::ordering::sort_sessions;
use crate::services::{current_user, forbidden, internal_error, not_found, try_response};
use crate::storage::{RowScope, Storage};

use super::compute::{attendance_rate, behavior_rows_average, grade_averages};
use super::{StatsService, teacher_stats_key};

/// 按课节分组
fn group_by_session<T>(rows: Vec<T>, session_of: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(session_of(&row)).or_default().push(row);
    }
    grouped
}

pub async fn compute_teacher_stats(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<TeacherStats> {
    let courses = storage.list_teacher_courses(teacher_id).await?;
    let mut sessions: Vec<_> = courses
        .iter()
        .flat_map(|course| course.sessions.iter().filter(|s| s.is_active).cloned())
        .collect();
    sort_sessions(&mut sessions);

    let session_ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
    let attendances = storage
        .list_attendance_rows(RowScope::Sessions(session_ids.clone()))
        .await?;
    let behaviors = storage
        .list_behavior_rows(RowScope::Sessions(session_ids.clone()))
        .await?;
    let grades = storage
        .list_grade_rows(RowScope::Sessions(session_ids))
        .await?;

    let total_attendance_rate = attendance_rate(&attendances);
    let total_behavior = behavior_rows_average(&behaviors);
    let total_grade = grade_averages(&grades).overall;

    let mut attendance_by_session = group_by_session(attendances, |r| r.course_session_id);
    let mut behavior_by_session = group_by_session(behaviors, |r| r.course_session_id);
    let mut grade_by_session = group_by_session(grades, |r| r.course_session_id);

    let mut students = HashSet::new();
    let mut session_stats = Vec::with_capacity(sessions.len());
    for session in &sessions {
        let student_ids = storage.list_session_student_ids(session.id).await?;
        students.extend(student_ids.iter().copied());

        let attendance = attendance_by_session.remove(&session.id).unwrap_or_default();
        let behavior = behavior_by_session.remove(&session.id).unwrap_or_default();
        let grade = grade_by_session.remove(&session.id).unwrap_or_default();

        session_stats.push(SessionStats {
            session_id: session.id,
            course_id: session.course_id,
            subject: session.subject,
            level: session.level.clone(),
            time_slot: session.time_slot,
            start_time: session.start_time.clone(),
            student_count: student_ids.len() as i64,
            attendance_rate: attendance_rate(&attendance),
            behavior_average: behavior_rows_average(&behavior),
            grade_average: grade_averages(&grade).overall,
        });
    }

    Ok(TeacherStats {
        teacher_id,
        total_courses: courses.len() as i64,
        total_sessions: sessions.len() as i64,
        total_students: students.len() as i64,
        attendance_rate: total_attendance_rate,
        behavior_average: total_behavior,
        grade_average: total_grade,
        sessions: session_stats,
    })
}

pub async fn get_teacher_stats(
    service: &StatsService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    if user.role != UserRole::Admin && user.id != teacher_id {
        return Ok(forbidden(ErrorCode::Forbidden, "Accès refusé"));
    }

    let storage = service.get_storage(request);
    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(teacher)) if teacher.role == UserRole::Teacher => {}
        Ok(_) => return Ok(not_found(ErrorCode::UserNotFound, "Enseignant introuvable")),
        Err(e) => return Ok(internal_error("Failed to load teacher", e)),
    }

    let cache = service.get_cache(request);
    let key = teacher_stats_key(teacher_id);
    if let Some(stats) = cache::get_json::<TeacherStats>(cache.as_ref(), &key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Statistiques récupérées")));
    }

    match compute_teacher_stats(&storage, teacher_id).await {
        Ok(stats) => {
            cache::insert_json(
                cache.as_ref(),
                key,
                &stats,
                AppConfig::get().cache.default_ttl,
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Statistiques récupérées")))
        }
        Err(e) => Ok(internal_error("Failed to compute teacher stats", e)),
    }
}
