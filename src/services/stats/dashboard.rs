use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::stats::entities::{DashboardStats, HighRiskStudent};
use crate::models::users::entities::UserRole;
use crate::services::internal_error;
use crate::storage::{RowScope, Storage};

use super::StatsService;
use super::compute::{attendance_rate, is_high_risk};

pub async fn compute_dashboard(
    storage: &Arc<dyn Storage>,
    high_risk_step: u32,
) -> Result<DashboardStats> {
    let attendances = storage.list_attendance_rows(RowScope::All).await?;

    let mut absences: HashMap<i64, i64> = HashMap::new();
    for row in attendances.iter().filter(|r| !r.is_present) {
        *absences.entry(row.student_id).or_default() += 1;
    }
    let flagged: HashMap<i64, i64> = absences
        .into_iter()
        .filter(|(_, count)| is_high_risk(*count, high_risk_step))
        .collect();

    let mut high_risk_students: Vec<HighRiskStudent> = storage
        .get_users_by_ids(flagged.keys().copied().collect())
        .await?
        .into_iter()
        .filter(|u| u.role == UserRole::Student && u.is_active)
        .map(|u| HighRiskStudent {
            absences: flagged.get(&u.id).copied().unwrap_or_default(),
            student_id: u.id,
            firstname: u.firstname,
            lastname: u.lastname,
        })
        .collect();
    high_risk_students.sort_by(|a, b| {
        b.absences
            .cmp(&a.absences)
            .then_with(|| a.lastname.cmp(&b.lastname))
            .then_with(|| a.student_id.cmp(&b.student_id))
    });

    Ok(DashboardStats {
        active_students: storage.count_active_users_by_role(UserRole::Student).await?,
        active_teachers: storage.count_active_users_by_role(UserRole::Teacher).await?,
        active_courses: storage.count_active_courses().await?,
        active_sessions: storage.count_active_sessions().await?,
        attendance_rate: attendance_rate(&attendances),
        high_risk_students,
    })
}

pub async fn get_dashboard(
    service: &StatsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let step = AppConfig::get().school.high_risk_absence_step;
    match compute_dashboard(&storage, step).await {
        Ok(stats) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Tableau de bord récupéré")))
        }
        Err(e) => Ok(internal_error("Failed to compute dashboard", e)),
    }
}
