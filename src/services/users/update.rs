use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::info;

use crate::cache::ObjectCache;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ErrorCode;
use crate::models::users::entities::{Gender, User, UserRole};
use crate::models::users::requests::UpdateUserRequest;
use crate::services::{conflict, internal_error, not_found};
use crate::storage::Storage;

use super::{check_date_of_birth, check_email, check_name, check_school_year, load_account};

/// 允许修改的资料字段，None 表示不变
#[derive(Debug, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub parent_email: Option<String>,
    pub school_year: Option<String>,
}

pub async fn update_account(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    id: i64,
    role: UserRole,
    changes: AccountChanges,
) -> Result<User, HttpResponse> {
    load_account(storage, id, role).await?;

    let update = UpdateUserRequest {
        email: changes.email.as_deref().map(check_email).transpose()?,
        firstname: changes.firstname.as_deref().map(check_name).transpose()?,
        lastname: changes.lastname.as_deref().map(check_name).transpose()?,
        phone: changes.phone,
        gender: changes.gender,
        date_of_birth: changes
            .date_of_birth
            .as_deref()
            .map(check_date_of_birth)
            .transpose()?,
        parent_email: changes.parent_email.as_deref().map(check_email).transpose()?,
        school_year: changes
            .school_year
            .as_deref()
            .map(check_school_year)
            .transpose()?,
        ..Default::default()
    };

    match storage.update_user(id, update).await {
        Ok(Some(user)) => {
            cache.remove(&user_cache_key(id)).await;
            info!("Updated account {}", id);
            Ok(user)
        }
        Ok(None) => Err(not_found(ErrorCode::UserNotFound, "Utilisateur introuvable")),
        Err(e) if e.is_unique_violation() => Err(conflict(
            ErrorCode::UserAlreadyExists,
            "Cet email est déjà utilisé",
        )),
        Err(e) => Err(internal_error("User update failed", e)),
    }
}
