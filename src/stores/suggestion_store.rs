use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::items::ItemError;
use crate::types::db::suggestion::{self, Entity as Suggestion};

/// SuggestionStore persists free-form platform feedback.
pub struct SuggestionStore {
    db: DatabaseConnection,
}

impl SuggestionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<suggestion::Model, ItemError> {
        let model = suggestion::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            content: Set(content.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };
        model.insert(&self.db).await.map_err(ItemError::internal_error)
    }

    /// All suggestions, newest first, optionally narrowed to one author
    pub async fn list(
        &self,
        posted_by: Option<&str>,
    ) -> Result<Vec<suggestion::Model>, ItemError> {
        let mut query = Suggestion::find();
        if let Some(author) = posted_by {
            query = query.filter(suggestion::Column::UserId.eq(author));
        }
        query
            .order_by_desc(suggestion::Column::CreatedAt)
            .order_by_desc(suggestion::Column::Id)
            .all(&self.db)
            .await
            .map_err(ItemError::internal_error)
    }

    /// Rewrite a suggestion; only the author may edit
    pub async fn update(
        &self,
        suggestion_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<suggestion::Model, ItemError> {
        let existing = self.find_owned(suggestion_id, user_id, "update").await?;

        let mut active: suggestion::ActiveModel = existing.into();
        active.content = Set(content.to_string());
        active.update(&self.db).await.map_err(ItemError::internal_error)
    }

    /// Remove a suggestion; only the author may delete
    pub async fn delete(&self, suggestion_id: &str, user_id: &str) -> Result<(), ItemError> {
        let existing = self.find_owned(suggestion_id, user_id, "delete").await?;

        Suggestion::delete_by_id(&existing.id)
            .exec(&self.db)
            .await
            .map_err(ItemError::internal_error)?;
        Ok(())
    }

    async fn find_owned(
        &self,
        suggestion_id: &str,
        user_id: &str,
        action: &str,
    ) -> Result<suggestion::Model, ItemError> {
        let existing = Suggestion::find_by_id(suggestion_id)
            .one(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Suggestion"))?;

        if existing.user_id != user_id {
            return Err(ItemError::forbidden(format!(
                "Not authorized to {} this suggestion",
                action
            )));
        }
        Ok(existing)
    }
}

impl std::fmt::Debug for SuggestionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionStore").field("db", &"<connection>").finish()
    }
}
