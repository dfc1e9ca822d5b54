pub mod get;
pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::ErrorCode;
use crate::models::courses::entities::{Course, TimeSlot};
use crate::models::courses::requests::{
    CourseListParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::schedules::entities::Schedule;
use crate::models::users::entities::UserRole;
use crate::storage::Storage;
use crate::utils::validate::parse_time;

use super::schedules::fits_schedule;
use super::schedules::ordering::sort_sessions;
use super::{bad_request, internal_error, invalid_data};

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

/// 校验课节时间：HH:MM、开始早于结束、落在该时间段的作息内
pub fn validate_session_times(
    time_slot: TimeSlot,
    start_time: &str,
    end_time: &str,
    schedules: &[Schedule],
) -> Result<(), String> {
    let start = parse_time(start_time).map_err(str::to_string)?;
    let end = parse_time(end_time).map_err(str::to_string)?;
    if start >= end {
        return Err("l'heure de début doit précéder l'heure de fin".to_string());
    }
    if !fits_schedule(time_slot, start_time, end_time, schedules) {
        return Err(format!(
            "horaires hors du créneau {}",
            time_slot.label()
        ));
    }
    Ok(())
}

/// 教师列表非空、无重复，且都是活跃教师
pub(crate) async fn check_teachers(
    storage: &Arc<dyn Storage>,
    teacher_ids: &[i64],
) -> Result<(), HttpResponse> {
    if teacher_ids.is_empty() {
        return Err(invalid_data("au moins un enseignant est requis"));
    }
    let unique: HashSet<i64> = teacher_ids.iter().copied().collect();
    if unique.len() != teacher_ids.len() {
        return Err(invalid_data("enseignant en double"));
    }

    let users = match storage.get_users_by_ids(teacher_ids.to_vec()).await {
        Ok(users) => users,
        Err(e) => return Err(internal_error("Failed to load teachers", e)),
    };
    let valid = users
        .iter()
        .filter(|u| u.role == UserRole::Teacher && u.is_active)
        .count();
    if valid != teacher_ids.len() {
        return Err(bad_request(
            ErrorCode::UserRoleMismatch,
            "Enseignant inconnu ou inactif",
        ));
    }
    Ok(())
}

/// 课程内的课节按作息顺序排列
pub(crate) fn sorted_course(mut course: Course) -> Course {
    sort_sessions(&mut course.sessions);
    course
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        super::cache_from(request)
    }

    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        body: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_course(self, request, body).await
    }

    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        body: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_course(self, request, course_id, body).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_course(self, request, course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn morning() -> Schedule {
        Schedule {
            time_slot: TimeSlot::SaturdayMorning,
            start_time: "09:00".to_string(),
            middle_time: "10:45".to_string(),
            end_time: "12:30".to_string(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_session_times_inside_schedule() {
        let schedules = [morning()];
        let slot = TimeSlot::SaturdayMorning;
        assert!(validate_session_times(slot, "09:00", "10:45", &schedules).is_ok());
        assert!(validate_session_times(slot, "08:30", "10:00", &schedules).is_err());
        assert!(validate_session_times(slot, "11:00", "13:00", &schedules).is_err());
    }

    #[test]
    fn test_session_times_order_and_format() {
        assert!(validate_session_times(TimeSlot::SundayMorning, "10:00", "10:00", &[]).is_err());
        assert!(validate_session_times(TimeSlot::SundayMorning, "9h", "10:00", &[]).is_err());
        // 未配置作息的时间段只检查先后
        assert!(validate_session_times(TimeSlot::SundayMorning, "07:00", "08:00", &[]).is_ok());
    }
}
