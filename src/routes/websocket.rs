use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, rt, web};
use serde::Deserialize;
use tracing::debug;

use crate::middlewares::require_jwt::resolve_user;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::websocket::WebSocketService;
use crate::services::{cache_from, storage_from};

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: Option<String>,
}

/// 浏览器的 WebSocket 无法自定义请求头，access token 放在查询参数里
pub async fn connect(
    req: HttpRequest,
    query: web::Query<WsQuery>,
    stream: web::Payload,
) -> ActixResult<HttpResponse> {
    let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Jeton manquant",
        )));
    };

    let storage = storage_from(&req);
    let cache = cache_from(&req);
    let user = match resolve_user(token, &storage, &cache).await {
        Ok(user) => user,
        Err(message) => {
            debug!("WebSocket handshake rejected: {}", message);
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message)));
        }
    };

    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;
    rt::spawn(WebSocketService::handle_connection(
        user.id,
        storage,
        session,
        msg_stream,
    ));

    Ok(response)
}

pub fn configure_websocket_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/ws", web::get().to(connect));
}
