use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::ObjectCache;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ErrorCode;
use crate::models::users::entities::UserRole;
use crate::services::stats::refresh::evict_session_teachers;
use crate::services::stats::{student_stats_key, teacher_stats_key};
use crate::services::{internal_error, not_found};
use crate::storage::Storage;

use super::load_account;

/// 软删除账号，并清掉它的用户缓存与统计缓存
///
/// 学生的选课随账号一起删除，所在课节教师的统计也要失效。
pub async fn delete_account(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    id: i64,
    role: UserRole,
) -> Result<(), HttpResponse> {
    load_account(storage, id, role.clone()).await?;

    // 删除前先取课节，删除后选课已不存在
    let session_ids: Vec<i64> = if role == UserRole::Student {
        match storage.list_student_sessions(id).await {
            Ok(sessions) => sessions.into_iter().map(|s| s.id).collect(),
            Err(e) => {
                warn!("Failed to list sessions of student {}: {}", id, e);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    match storage.soft_delete_user(id).await {
        Ok(true) => {
            cache.remove(&user_cache_key(id)).await;
            for session_id in session_ids {
                evict_session_teachers(storage, cache, session_id).await;
            }
            let stats_key = match role {
                UserRole::Teacher => teacher_stats_key(id),
                _ => student_stats_key(id),
            };
            cache.remove(&stats_key).await;
            info!("Soft deleted {} account {}", role, id);
            Ok(())
        }
        Ok(false) => Err(not_found(ErrorCode::UserNotFound, "Utilisateur introuvable")),
        Err(e) => Err(internal_error("User deletion failed", e)),
    }
}
