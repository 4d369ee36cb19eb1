use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::types::db::notification::{self, Entity as Notification};

/// NotificationStore persists per-user notification records
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a notification for a user
    pub async fn emit(
        &self,
        user_id: &str,
        kind: &str,
        item_id: Option<&str>,
        body: &str,
    ) -> Result<notification::Model, DbErr> {
        let model = notification::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            kind: Set(kind.to_string()),
            item_id: Set(item_id.map(str::to_string)),
            body: Set(body.to_string()),
            read: Set(false),
            created_at: Set(Utc::now().timestamp()),
        };
        model.insert(&self.db).await
    }

    /// All notifications for the user, newest first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<notification::Model>, DbErr> {
        Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Mark one notification as read; no-op when the id belongs to another
    /// user or does not exist
    pub async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<u64, DbErr> {
        let result = Notification::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::Id.eq(notification_id))
            .filter(notification::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Mark every unread notification for the user as read
    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64, DbErr> {
        let result = Notification::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::Read.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("db", &"<connection>")
            .finish()
    }
}
