pub mod detail;
pub mod list;
pub mod send;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::EdurootsError;
use crate::models::messages::entities::{MAX_MESSAGE_BODY_CHARS, Message};
use crate::models::messages::requests::{MessageListParams, SendMessageRequest};
use crate::storage::Storage;

use super::websocket::{ConnectionManager, WsMessage};

/// 发送失败的原因
#[derive(Debug)]
pub enum SendError {
    /// 正文或主题不合法
    Invalid(String),
    /// 收件人不存在、已停用或是自己
    Recipient(&'static str),
    Storage(EdurootsError),
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Invalid(reason) => write!(f, "{reason}"),
            SendError::Recipient(reason) => write!(f, "{reason}"),
            SendError::Storage(e) => write!(f, "{e}"),
        }
    }
}

/// 正文去掉首尾空白后不能为空，且不超过上限；空主题视为没有主题
pub fn normalize_message(
    subject: Option<String>,
    body: &str,
) -> Result<(Option<String>, String), String> {
    let body = body.trim();
    if body.is_empty() {
        return Err("le message est vide".to_string());
    }
    if body.chars().count() > MAX_MESSAGE_BODY_CHARS {
        return Err(format!(
            "le message dépasse {MAX_MESSAGE_BODY_CHARS} caractères"
        ));
    }
    let subject = subject
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    Ok((subject, body.to_string()))
}

/// 校验、保存并推送一条消息（HTTP 与 WebSocket 共用）
pub async fn deliver_message(
    storage: &Arc<dyn Storage>,
    sender_id: i64,
    request: SendMessageRequest,
) -> Result<Message, SendError> {
    let (subject, body) =
        normalize_message(request.subject, &request.body).map_err(SendError::Invalid)?;
    if request.recipient_id == sender_id {
        return Err(SendError::Recipient("impossible de s'envoyer un message"));
    }
    match storage.get_user_by_id(request.recipient_id).await {
        Ok(Some(user)) if user.can_login() => {}
        Ok(_) => return Err(SendError::Recipient("destinataire introuvable")),
        Err(e) => return Err(SendError::Storage(e)),
    }

    let message = storage
        .create_message(
            sender_id,
            SendMessageRequest {
                recipient_id: request.recipient_id,
                subject,
                body,
            },
        )
        .await
        .map_err(SendError::Storage)?;

    ConnectionManager::get().send_to_user(
        message.recipient_id,
        WsMessage::Message {
            payload: message.clone(),
        },
    );
    Ok(message)
}

pub struct MessageService {
    storage: Option<Arc<dyn Storage>>,
}

impl MessageService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn send_message(
        &self,
        request: &HttpRequest,
        body: SendMessageRequest,
    ) -> ActixResult<HttpResponse> {
        send::send_message(self, request, body).await
    }

    pub async fn list_inbox(
        &self,
        request: &HttpRequest,
        query: MessageListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_inbox(self, request, query).await
    }

    pub async fn list_sent(
        &self,
        request: &HttpRequest,
        query: MessageListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_sent(self, request, query).await
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::unread_count(self, request).await
    }

    pub async fn get_message(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_message(self, request, id).await
    }

    pub async fn mark_read(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::mark_read(self, request, id).await
    }

    pub async fn delete_message(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::delete_message(self, request, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_trimmed_and_required() {
        let (subject, body) = normalize_message(Some("  ".into()), "  Bonjour ").unwrap();
        assert_eq!(subject, None);
        assert_eq!(body, "Bonjour");
        assert!(normalize_message(None, "   ").is_err());
    }

    #[test]
    fn test_body_length_limit() {
        let long = "a".repeat(MAX_MESSAGE_BODY_CHARS + 1);
        assert!(normalize_message(None, &long).is_err());
        let exact = "é".repeat(MAX_MESSAGE_BODY_CHARS);
        assert!(normalize_message(None, &exact).is_ok());
    }
}
