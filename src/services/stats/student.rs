use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::stats::entities::StudentStats;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, internal_error, not_found, try_response};
use crate::storage::{RowScope, Storage};

use super::compute::{
    absence_count, attendance_rate, behavior_rows_average, grade_averages, is_high_risk,
    justified_absence_count, last_activity,
};
use super::{StatsService, student_stats_key};

/// 从明细计算学生统计
pub async fn compute_student_stats(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    high_risk_step: u32,
) -> Result<StudentStats> {
    let attendances = storage
        .list_attendance_rows(RowScope::Student(student_id))
        .await?;
    let behaviors = storage
        .list_behavior_rows(RowScope::Student(student_id))
        .await?;
    let grades = storage.list_grade_rows(RowScope::Student(student_id)).await?;

    let absences = absence_count(&attendances);
    Ok(StudentStats {
        student_id,
        total_sessions_recorded: attendances.len() as i64,
        absences_count: absences,
        justified_absences_count: justified_absence_count(&attendances),
        attendance_rate: attendance_rate(&attendances),
        behavior_average: behavior_rows_average(&behaviors),
        grades: grade_averages(&grades),
        is_high_risk: is_high_risk(absences, high_risk_step),
        last_activity: last_activity(&attendances, &behaviors, &grades),
    })
}

pub async fn get_student_stats(
    service: &StatsService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    // 学生只能看自己，教师只能看自己课节里的学生
    match user.role {
        UserRole::Admin => {}
        UserRole::Student if user.id == student_id => {}
        UserRole::Teacher => match storage.list_teacher_student_ids(user.id).await {
            Ok(ids) if ids.contains(&student_id) => {}
            Ok(_) => return Ok(forbidden(ErrorCode::Forbidden, "Accès refusé")),
            Err(e) => return Ok(internal_error("Failed to check teacher students", e)),
        },
        UserRole::Student => return Ok(forbidden(ErrorCode::Forbidden, "Accès refusé")),
    }

    match storage.get_user_by_id(student_id).await {
        Ok(Some(student)) if student.role == UserRole::Student => {}
        Ok(_) => return Ok(not_found(ErrorCode::UserNotFound, "Élève introuvable")),
        Err(e) => return Ok(internal_error("Failed to load student", e)),
    }

    let cache = service.get_cache(request);
    let key = student_stats_key(student_id);
    if let Some(stats) = cache::get_json::<StudentStats>(cache.as_ref(), &key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Statistiques récupérées")));
    }

    let config = AppConfig::get();
    match compute_student_stats(&storage, student_id, config.school.high_risk_absence_step).await {
        Ok(stats) => {
            cache::insert_json(cache.as_ref(), key, &stats, config.cache.default_ttl).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Statistiques récupérées")))
        }
        Err(e) => Ok(internal_error("Failed to compute student stats", e)),
    }
}
