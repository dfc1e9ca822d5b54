use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::messages::requests::SendMessageRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, invalid_data, try_response};

use super::{MessageService, SendError, deliver_message};

pub async fn send_message(
    service: &MessageService,
    request: &HttpRequest,
    body: SendMessageRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    match deliver_message(&storage, user.id, body).await {
        Ok(message) => {
            info!(
                "Message {} sent from {} to {}",
                message.id, message.sender_id, message.recipient_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(message, "Message envoyé")))
        }
        Err(SendError::Invalid(reason)) => Ok(invalid_data(reason)),
        Err(SendError::Recipient(reason)) => {
            Ok(bad_request(ErrorCode::MessageRecipientInvalid, reason))
        }
        Err(SendError::Storage(e)) => Ok(internal_error("Failed to send message", e)),
    }
}
