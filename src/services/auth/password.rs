use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::user_cache_key;
use crate::models::auth::requests::ChangePasswordRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found, try_response};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::AuthService;

pub async fn handle_change_password(
    service: &AuthService,
    body: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current = try_response!(current_user(request));
    let storage = service.get_storage(request);

    // 缓存里的用户没有密码哈希，必须回库读取
    let user = match storage.get_user_by_id(current.id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Utilisateur introuvable")),
        Err(e) => return Ok(internal_error("Failed to load user", e)),
    };

    if !verify_password(&body.current_password, &user.password_hash) {
        return Ok(bad_request(
            ErrorCode::UserPasswordInvalid,
            "Mot de passe actuel incorrect",
        ));
    }
    if body.current_password == body.new_password {
        return Ok(bad_request(
            ErrorCode::UserPasswordInvalid,
            "Le nouveau mot de passe doit être différent de l'ancien",
        ));
    }
    if let Err(msg) = validate_password_simple(&body.new_password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    let password_hash = match hash_password(&body.new_password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };
    let update = UpdateUserRequest {
        password: Some(password_hash),
        ..Default::default()
    };

    match storage.update_user(user.id, update).await {
        Ok(Some(_)) => {
            service.get_cache(request).remove(&user_cache_key(user.id)).await;
            tracing::info!("User {} changed password", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Mot de passe modifié")))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "Utilisateur introuvable")),
        Err(e) => Ok(internal_error("Failed to update password", e)),
    }
}
