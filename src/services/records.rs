//! 出勤、行为、成绩共用的校验

use actix_web::{HttpRequest, HttpResponse};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

use crate::middlewares::RequireSessionAccess;
use crate::middlewares::require_session_access::{SessionAccess, check_session_access};
use crate::models::{ApiResponse, ErrorCode};
use crate::models::common::DateRangeParams;
use crate::models::courses::entities::CourseSession;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::validate::parse_date;

use super::holidays::is_holiday;
use super::{bad_request, forbidden, internal_error, invalid_data, not_found};

/// 载荷校验失败时的回复
///
/// 出勤与成绩附带原因，行为接口只回 "Données invalides"。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadErrors {
    Detailed,
    Bare,
}

impl PayloadErrors {
    pub fn reject(self, reason: impl AsRef<str>) -> HttpResponse {
        match self {
            PayloadErrors::Detailed => invalid_data(reason),
            PayloadErrors::Bare => HttpResponse::BadRequest().json(ApiResponse::invalid_data()),
        }
    }
}

/// 第一个重复出现的学生 ID
pub fn find_duplicate(student_ids: &[i64]) -> Option<i64> {
    let mut seen = HashSet::with_capacity(student_ids.len());
    student_ids.iter().copied().find(|id| !seen.insert(*id))
}

pub async fn load_session(
    storage: &Arc<dyn Storage>,
    session_id: i64,
) -> Result<CourseSession, HttpResponse> {
    match storage.get_session_by_id(session_id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(not_found(ErrorCode::SessionNotFound, "Séance introuvable")),
        Err(e) => Err(internal_error("Failed to load session", e)),
    }
}

/// 记录按其课节鉴权（用于 `/attendances/{id}` 这类不带 session_id 的路由）
pub async fn authorize_session(
    storage: &Arc<dyn Storage>,
    user: &User,
    session_id: i64,
) -> Result<CourseSession, HttpResponse> {
    let session = load_session(storage, session_id).await?;
    match check_session_access(storage, user, &session).await {
        Ok(SessionAccess::Granted) => Ok(session),
        Ok(SessionAccess::Forbidden) => Err(forbidden(
            ErrorCode::SessionPermissionDenied,
            "Accès refusé à cette séance",
        )),
        Err(e) => Err(internal_error("Session access check failed", e)),
    }
}

/// 取中间件已校验的课节，没有时重新鉴权
pub async fn resolve_session(
    request: &HttpRequest,
    storage: &Arc<dyn Storage>,
    user: &User,
    session_id: i64,
) -> Result<CourseSession, HttpResponse> {
    match RequireSessionAccess::extract_session(request) {
        Some(session) if session.id == session_id => Ok(session),
        _ => authorize_session(storage, user, session_id).await,
    }
}

/// 已删除的课节只读
pub fn ensure_writable(session: CourseSession) -> Result<CourseSession, HttpResponse> {
    if session.is_active {
        Ok(session)
    } else {
        Err(not_found(ErrorCode::SessionNotFound, "Séance introuvable"))
    }
}

/// 写操作用的 [`resolve_session`]
pub async fn resolve_writable_session(
    request: &HttpRequest,
    storage: &Arc<dyn Storage>,
    user: &User,
    session_id: i64,
) -> Result<CourseSession, HttpResponse> {
    ensure_writable(resolve_session(request, storage, user, session_id).await?)
}

/// 解析记录日期并排除假期
pub async fn parse_record_date(
    storage: &Arc<dyn Storage>,
    raw: &str,
    errors: PayloadErrors,
) -> Result<NaiveDate, HttpResponse> {
    let date = parse_date(raw).map_err(|reason| errors.reject(reason))?;
    let holidays = storage
        .list_holidays(false)
        .await
        .map_err(|e| internal_error("Failed to list holidays", e))?;
    if is_holiday(date, &holidays) {
        return Err(bad_request(
            ErrorCode::DateIsHoliday,
            format!("Le {date} est un jour de congé"),
        ));
    }
    Ok(date)
}

/// 明细非空、学生不重复且都在该课节中
pub async fn check_students(
    storage: &Arc<dyn Storage>,
    session_id: i64,
    student_ids: &[i64],
    errors: PayloadErrors,
) -> Result<(), HttpResponse> {
    if student_ids.is_empty() {
        return Err(errors.reject("aucun élève fourni"));
    }
    if let Some(duplicate) = find_duplicate(student_ids) {
        return Err(errors.reject(format!("élève {duplicate} en double")));
    }

    let enrolled: HashSet<i64> = storage
        .list_session_student_ids(session_id)
        .await
        .map_err(|e| internal_error("Failed to list session students", e))?
        .into_iter()
        .collect();
    if let Some(missing) = student_ids.iter().find(|id| !enrolled.contains(id)) {
        return Err(bad_request(
            ErrorCode::StudentNotEnrolled,
            format!("L'élève {missing} n'est pas inscrit à cette séance"),
        ));
    }
    Ok(())
}

pub fn parse_range(
    params: &DateRangeParams,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), HttpResponse> {
    let from = params
        .from
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(invalid_data)?;
    let to = params
        .to
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(invalid_data)?;
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(invalid_data("from doit précéder to"));
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::courses::entities::{Subject, TimeSlot};

    fn session(is_active: bool) -> CourseSession {
        let now = chrono::Utc::now();
        CourseSession {
            id: 7,
            course_id: 3,
            subject: Subject::Arabic,
            level: "N1".to_string(),
            time_slot: TimeSlot::SaturdayMorning,
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
            classroom_number: None,
            stats: Default::default(),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_web::test]
    async fn test_bare_payload_errors_hide_reason() {
        let detailed = PayloadErrors::Detailed.reject("élève 3 en double");
        let body = actix_web::body::to_bytes(detailed.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Données invalides: élève 3 en double");

        let bare = PayloadErrors::Bare.reject("élève 3 en double");
        assert_eq!(bare.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = actix_web::body::to_bytes(bare.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Données invalides");
    }

    #[test]
    fn test_deleted_session_is_read_only() {
        assert_eq!(ensure_writable(session(true)).map(|s| s.id).ok(), Some(7));
        let refused = ensure_writable(session(false)).unwrap_err();
        assert_eq!(refused.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_find_duplicate() {
        assert_eq!(find_duplicate(&[1, 2, 3]), None);
        assert_eq!(find_duplicate(&[1, 2, 1, 2]), Some(1));
        assert_eq!(find_duplicate(&[]), None);
    }

    #[test]
    fn test_parse_range() {
        let params = DateRangeParams {
            pagination: PaginationQuery::default(),
            from: Some("2025-09-01".to_string()),
            to: Some("2025-12-31".to_string()),
        };
        let (from, to) = parse_range(&params).unwrap();
        assert!(from.unwrap() < to.unwrap());

        let reversed = DateRangeParams {
            pagination: PaginationQuery::default(),
            from: Some("2025-12-31".to_string()),
            to: Some("2025-09-01".to_string()),
        };
        assert!(parse_range(&reversed).is_err());

        let garbage = DateRangeParams {
            pagination: PaginationQuery::default(),
            from: Some("hier".to_string()),
            to: None,
        };
        assert!(parse_range(&garbage).is_err());
    }
}
