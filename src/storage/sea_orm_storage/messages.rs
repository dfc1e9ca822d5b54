//! 站内消息存储操作

use super::SeaOrmStorage;
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::{EdurootsError, Result};
use crate::models::{
    PaginationInfo,
    messages::{
        entities::Message,
        requests::{Mailbox, MessageListQuery, SendMessageRequest},
        responses::MessageListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_message_impl(
        &self,
        sender_id: i64,
        message: SendMessageRequest,
    ) -> Result<Message> {
        let result = ActiveModel {
            sender_id: Set(sender_id),
            recipient_id: Set(message.recipient_id),
            subject: Set(message.subject),
            body: Set(message.body),
            is_read: Set(false),
            deleted_by_sender: Set(false),
            deleted_by_recipient: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| EdurootsError::database_operation(format!("发送消息失败: {e}")))?;

        Ok(result.into_message())
    }

    pub async fn get_message_by_id_impl(&self, id: i64) -> Result<Option<Message>> {
        let result = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询消息失败: {e}")))?;

        Ok(result.map(|m| m.into_message()))
    }

    /// 收件箱或发件箱，最新在前
    pub async fn list_messages_with_pagination_impl(
        &self,
        query: MessageListQuery,
    ) -> Result<MessageListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = match query.mailbox {
            Mailbox::Inbox => Messages::find()
                .filter(Column::RecipientId.eq(query.user_id))
                .filter(Column::DeletedByRecipient.eq(false)),
            Mailbox::Sent => Messages::find()
                .filter(Column::SenderId.eq(query.user_id))
                .filter(Column::DeletedBySender.eq(false)),
        };
        if query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询消息总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询消息页数失败: {e}")))?;
        let messages = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询消息列表失败: {e}")))?;

        Ok(MessageListResponse {
            items: messages.into_iter().map(|m| m.into_message()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn count_unread_messages_impl(&self, user_id: i64) -> Result<i64> {
        let count = Messages::find()
            .filter(Column::RecipientId.eq(user_id))
            .filter(Column::DeletedByRecipient.eq(false))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("统计未读消息失败: {e}")))?;

        Ok(count as i64)
    }

    pub async fn mark_message_read_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("标记消息已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 发件人与收件人各自隐藏
    pub async fn hide_message_for_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let Some(message) = self.get_message_by_id_impl(id).await? else {
            return Ok(false);
        };

        if !message.involves(user_id) {
            return Ok(false);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if message.sender_id == user_id {
            model.deleted_by_sender = Set(true);
        }
        if message.recipient_id == user_id {
            model.deleted_by_recipient = Set(true);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除消息失败: {e}")))?;

        Ok(true)
    }
}
