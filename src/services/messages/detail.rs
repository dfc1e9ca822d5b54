use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::messages::entities::Message;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found, try_response};

use super::MessageService;

fn message_not_found() -> HttpResponse {
    not_found(ErrorCode::MessageNotFound, "Message introuvable")
}

/// 只有仍能看到该消息的发件人或收件人可以访问，其他人一律 404
async fn load_visible(
    service: &MessageService,
    request: &HttpRequest,
    user_id: i64,
    id: i64,
) -> Result<Message, HttpResponse> {
    match service.get_storage(request).get_message_by_id(id).await {
        Ok(Some(message)) if message.visible_to(user_id) => Ok(message),
        Ok(_) => Err(message_not_found()),
        Err(e) => Err(internal_error("Failed to load message", e)),
    }
}

pub async fn get_message(
    service: &MessageService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let mut message = try_response!(load_visible(service, request, user.id, id).await);

    // 收件人阅读即标记已读
    if message.recipient_id == user.id && !message.is_read {
        match service.get_storage(request).mark_message_read(id).await {
            Ok(_) => message.is_read = true,
            Err(e) => tracing::warn!("Failed to mark message {} as read: {}", id, e),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(message, "Message récupéré")))
}

pub async fn mark_read(
    service: &MessageService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let message = try_response!(load_visible(service, request, user.id, id).await);
    if message.recipient_id != user.id {
        return Ok(message_not_found());
    }

    match service.get_storage(request).mark_message_read(id).await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Message marqué comme lu"))),
        Err(e) => Ok(internal_error("Failed to mark message as read", e)),
    }
}

/// 只对当前用户隐藏，另一方仍可见
pub async fn delete_message(
    service: &MessageService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    try_response!(load_visible(service, request, user.id, id).await);

    match service.get_storage(request).hide_message_for(id, user.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Message supprimé"))),
        Ok(false) => Ok(message_not_found()),
        Err(e) => Ok(internal_error("Failed to delete message", e)),
    }
}
