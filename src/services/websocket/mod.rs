/*!
 * WebSocket 实时聊天
 *
 * 客户端通过 `ws://host/api/v1/ws?token=<access_token>` 连接。
 *
 * ## 帧格式
 *
 * 客户端发送：
 * ```json
 * {"type": "ping"}
 * {"type": "chat", "to": 12, "content": "Bonjour"}
 * ```
 *
 * 服务端推送：
 * ```json
 * {"type": "connected", "user_id": 7}
 * {"type": "pong"}
 * {"type": "message", "payload": {"id": 1, "sender_id": 7, "recipient_id": 12, ...}}
 * {"type": "error", "message": "destinataire introuvable"}
 * ```
 *
 * `chat` 帧与 `POST /api/v1/messages` 走同一套校验并落库，
 * 发送方会收到一条 `message` 帧作为确认。
 */

use actix_ws::Message as WsFrame;
use dashmap::DashMap;
use futures_util::StreamExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::models::messages::entities::Message;
use crate::models::messages::requests::SendMessageRequest;
use crate::storage::Storage;

use super::messages::{SendError, deliver_message};

/// 心跳间隔（秒）
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// 每个用户的推送缓冲
const CHANNEL_CAPACITY: usize = 100;

/// 全局连接管理器
static CONNECTION_MANAGER: Lazy<ConnectionManager> = Lazy::new(ConnectionManager::new);

/// WebSocket 帧
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// 心跳请求
    Ping,
    /// 心跳响应
    Pong,
    /// 连接成功
    Connected { user_id: i64 },
    /// 客户端发出的聊天内容
    Chat { to: i64, content: String },
    /// 新消息推送
    Message { payload: Message },
    /// 错误消息
    Error { message: String },
}

impl WsMessage {
    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"serialization"}"#.to_string())
    }
}

/// 连接管理器
pub struct ConnectionManager {
    /// 用户 ID -> 广播发送器（同一用户的多个连接共享）
    connections: DashMap<i64, broadcast::Sender<WsMessage>>,
}

impl ConnectionManager {
    fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// 获取全局实例
    pub fn get() -> &'static Self {
        &CONNECTION_MANAGER
    }

    /// 注册用户连接
    pub fn register(&self, user_id: i64) -> broadcast::Receiver<WsMessage> {
        let entry = self.connections.entry(user_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
            tx
        });
        entry.subscribe()
    }

    /// 移除用户连接，只有没有订阅者时才删除
    pub fn unregister(&self, user_id: i64) {
        self.connections
            .remove_if(&user_id, |_, sender| sender.receiver_count() == 0);
    }

    /// 向指定用户推送，用户不在线时返回 false
    pub fn send_to_user(&self, user_id: i64, message: WsMessage) -> bool {
        match self.connections.get(&user_id) {
            Some(sender) => sender.send(message).is_ok(),
            None => false,
        }
    }

    /// 获取在线用户数
    pub fn online_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|entry| entry.receiver_count() > 0)
            .count()
    }
}

/// 处理一帧客户端文本，返回需要回给该连接的帧
async fn handle_client_frame(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    text: &str,
) -> Option<WsMessage> {
    let frame = match serde_json::from_str::<WsMessage>(text) {
        Ok(frame) => frame,
        Err(_) => {
            return Some(WsMessage::Error {
                message: "Données invalides".to_string(),
            });
        }
    };

    match frame {
        WsMessage::Ping => Some(WsMessage::Pong),
        WsMessage::Chat { to, content } => {
            let request = SendMessageRequest {
                recipient_id: to,
                subject: None,
                body: content,
            };
            match deliver_message(storage, user_id, request).await {
                Ok(message) => {
                    debug!("Chat message {} relayed from {} to {}", message.id, user_id, to);
                    Some(WsMessage::Message { payload: message })
                }
                Err(SendError::Storage(e)) => {
                    warn!("Failed to store chat message from {}: {}", user_id, e);
                    Some(WsMessage::Error {
                        message: "Erreur interne du serveur".to_string(),
                    })
                }
                Err(e) => Some(WsMessage::Error {
                    message: e.to_string(),
                }),
            }
        }
        other => {
            debug!("Ignored frame from user {}: {:?}", user_id, other);
            None
        }
    }
}

/// WebSocket 服务
pub struct WebSocketService;

impl WebSocketService {
    /// 处理 WebSocket 连接
    pub async fn handle_connection(
        user_id: i64,
        storage: Arc<dyn Storage>,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) {
        let manager = ConnectionManager::get();
        let mut rx = manager.register(user_id);
        info!(
            "WebSocket connected for user: {} ({} online)",
            user_id,
            manager.online_count()
        );

        if session
            .text(WsMessage::Connected { user_id }.to_json())
            .await
            .is_err()
        {
            manager.unregister(user_id);
            return;
        }

        let mut heartbeat =
            tokio::time::interval(std::time::Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            tokio::select! {
                // 客户端消息
                msg = stream.next() => {
                    match msg {
                        Some(Ok(WsFrame::Text(text))) => {
                            if let Some(reply) = handle_client_frame(&storage, user_id, &text).await
                                && session.text(reply.to_json()).await.is_err()
                            {
                                break;
                            }
                        }
                        Some(Ok(WsFrame::Ping(data))) => {
                            if session.pong(&data).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(WsFrame::Close(_))) | None => {
                            info!("WebSocket closed for user: {}", user_id);
                            break;
                        }
                        Some(Err(e)) => {
                            warn!("WebSocket error for user {}: {:?}", user_id, e);
                            break;
                        }
                        _ => {}
                    }
                }

                // 服务端推送
                msg = rx.recv() => {
                    match msg {
                        Ok(ws_msg) => {
                            if session.text(ws_msg.to_json()).await.is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!("WebSocket for user {} lagged by {} messages", user_id, n);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }

                // 心跳
                _ = heartbeat.tick() => {
                    if session.ping(b"").await.is_err() {
                        break;
                    }
                }
            }
        }

        drop(rx);
        manager.unregister(user_id);
        let _ = session.close(None).await;
        info!("WebSocket disconnected for user: {}", user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_tagged_by_type() {
        let frame: WsMessage =
            serde_json::from_str(r#"{"type":"chat","to":3,"content":"Salam"}"#).unwrap();
        assert!(matches!(frame, WsMessage::Chat { to: 3, ref content } if content == "Salam"));
        assert_eq!(WsMessage::Pong.to_json(), r#"{"type":"pong"}"#);
        assert_eq!(
            WsMessage::Connected { user_id: 5 }.to_json(),
            r#"{"type":"connected","user_id":5}"#
        );
    }

    #[tokio::test]
    async fn test_connection_manager_routes_to_user() {
        let manager = ConnectionManager::new();
        assert!(!manager.send_to_user(1, WsMessage::Pong));

        let mut rx = manager.register(1);
        assert_eq!(manager.online_count(), 1);
        assert!(manager.send_to_user(1, WsMessage::Pong));
        assert!(matches!(rx.recv().await, Ok(WsMessage::Pong)));

        drop(rx);
        manager.unregister(1);
        assert_eq!(manager.online_count(), 0);
    }
}
