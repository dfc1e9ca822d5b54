use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::messages::requests::{Mailbox, MessageListParams, MessageListQuery};
use crate::models::messages::responses::UnreadCountResponse;
use crate::services::{current_user, internal_error, try_response};

use super::MessageService;

async fn list_mailbox(
    service: &MessageService,
    request: &HttpRequest,
    query: MessageListParams,
    mailbox: Mailbox,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    let list_query = MessageListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        user_id: user.id,
        mailbox,
        // 未读筛选只对收件箱有意义
        unread_only: query.unread_only && mailbox == Mailbox::Inbox,
    };

    match storage.list_messages_with_pagination(list_query).await {
        Ok(response) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Messages récupérés")))
        }
        Err(e) => Ok(internal_error("Failed to list messages", e)),
    }
}

pub async fn list_inbox(
    service: &MessageService,
    request: &HttpRequest,
    query: MessageListParams,
) -> ActixResult<HttpResponse> {
    list_mailbox(service, request, query, Mailbox::Inbox).await
}

pub async fn list_sent(
    service: &MessageService,
    request: &HttpRequest,
    query: MessageListParams,
) -> ActixResult<HttpResponse> {
    list_mailbox(service, request, query, Mailbox::Sent).await
}

pub async fn unread_count(
    service: &MessageService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    let storage = service.get_storage(request);

    match storage.count_unread_messages(user.id).await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { count },
            "Nombre de messages non lus",
        ))),
        Err(e) => Ok(internal_error("Failed to count unread messages", e)),
    }
}
