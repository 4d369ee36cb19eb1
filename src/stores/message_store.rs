use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::types::db::message::{self, Entity as Message};

/// MessageStore persists user-to-user messages and the contact-share
/// messages released on request approval.
pub struct MessageStore {
    db: DatabaseConnection,
}

impl MessageStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persist a message from `sender` to `receiver`
    pub async fn send(
        &self,
        sender: &str,
        receiver: &str,
        content: &str,
        kind: &str,
    ) -> Result<message::Model, DbErr> {
        let model = message::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            sender: Set(sender.to_string()),
            receiver: Set(receiver.to_string()),
            content: Set(content.to_string()),
            kind: Set(kind.to_string()),
            read: Set(false),
            created_at: Set(Utc::now().timestamp()),
        };
        model.insert(&self.db).await
    }

    /// All messages the user sent or received, newest first. When `partner`
    /// is given, restricts to the conversation with that one user.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        partner: Option<&str>,
    ) -> Result<Vec<message::Model>, DbErr> {
        let condition = match partner {
            Some(partner) => Condition::any()
                .add(
                    Condition::all()
                        .add(message::Column::Sender.eq(user_id))
                        .add(message::Column::Receiver.eq(partner)),
                )
                .add(
                    Condition::all()
                        .add(message::Column::Sender.eq(partner))
                        .add(message::Column::Receiver.eq(user_id)),
                ),
            None => Condition::any()
                .add(message::Column::Sender.eq(user_id))
                .add(message::Column::Receiver.eq(user_id)),
        };

        Message::find()
            .filter(condition)
            .order_by_desc(message::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Mark every message addressed to the user from `partner` as read
    pub async fn mark_conversation_read(
        &self,
        user_id: &str,
        partner: &str,
    ) -> Result<u64, DbErr> {
        let result = Message::update_many()
            .col_expr(message::Column::Read, Expr::value(true))
            .filter(message::Column::Receiver.eq(user_id))
            .filter(message::Column::Sender.eq(partner))
            .filter(message::Column::Read.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore").field("db", &"<connection>").finish()
    }
}
