use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 消息正文最大长度（字符）
pub const MAX_MESSAGE_BODY_CHARS: usize = 5000;

// 站内消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: Option<String>,
    pub body: String,
    pub is_read: bool,
    #[serde(skip)]
    #[ts(skip)]
    pub deleted_by_sender: bool,
    #[serde(skip)]
    #[ts(skip)]
    pub deleted_by_recipient: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Message {
    pub fn involves(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// 对该用户是否仍可见
    pub fn visible_to(&self, user_id: i64) -> bool {
        (self.sender_id == user_id && !self.deleted_by_sender)
            || (self.recipient_id == user_id && !self.deleted_by_recipient)
    }
}
