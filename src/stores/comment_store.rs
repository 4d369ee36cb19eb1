use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::items::ItemError;
use crate::types::db::comment::{self, Entity as Comment};
use crate::types::db::item::Entity as Item;

/// CommentStore persists the public discussion threads under item listings.
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Post a comment under an existing item
    pub async fn create(
        &self,
        item_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<comment::Model, ItemError> {
        Item::find_by_id(item_id)
            .one(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Item"))?;

        let now = Utc::now().timestamp();
        let model = comment::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            item_id: Set(item_id.to_string()),
            user_id: Set(user_id.to_string()),
            content: Set(content.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.db).await.map_err(ItemError::internal_error)
    }

    /// All comments under one item, newest first
    pub async fn list_for_item(&self, item_id: &str) -> Result<Vec<comment::Model>, ItemError> {
        Comment::find()
            .filter(comment::Column::ItemId.eq(item_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(ItemError::internal_error)
    }

    /// All comments, newest first, optionally narrowed to one author
    pub async fn list(&self, posted_by: Option<&str>) -> Result<Vec<comment::Model>, ItemError> {
        let mut query = Comment::find();
        if let Some(author) = posted_by {
            query = query.filter(comment::Column::UserId.eq(author));
        }
        query
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(ItemError::internal_error)
    }

    /// Rewrite a comment; only the author may edit
    pub async fn update(
        &self,
        comment_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<comment::Model, ItemError> {
        let existing = Comment::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Comment"))?;

        if existing.user_id != user_id {
            return Err(ItemError::forbidden(
                "Not authorized to update this comment",
            ));
        }

        let mut active: comment::ActiveModel = existing.into();
        active.content = Set(content.to_string());
        active.updated_at = Set(Utc::now().timestamp());
        active.update(&self.db).await.map_err(ItemError::internal_error)
    }

    /// Remove a comment; allowed for its author and for the item's owner
    pub async fn delete(&self, comment_id: &str, user_id: &str) -> Result<(), ItemError> {
        let existing = Comment::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Comment"))?;

        if existing.user_id != user_id {
            let item = Item::find_by_id(&existing.item_id)
                .one(&self.db)
                .await
                .map_err(ItemError::internal_error)?;
            let owns_item = item.map(|i| i.posted_by == user_id).unwrap_or(false);
            if !owns_item {
                return Err(ItemError::forbidden(
                    "Not authorized to delete this comment",
                ));
            }
        }

        Comment::delete_by_id(&existing.id)
            .exec(&self.db)
            .await
            .map_err(ItemError::internal_error)?;
        Ok(())
    }
}

impl std::fmt::Debug for CommentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentStore").field("db", &"<connection>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::item;
    use crate::types::db::user;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn seed_user(db: &DatabaseConnection, id: &str) {
        let now = Utc::now().timestamp();
        let model = user::ActiveModel {
            id: Set(id.to_string()),
            first_name: Set(id.to_string()),
            last_name: Set("Rahman".to_string()),
            email: Set(format!("{}@bup.edu.bd", id)),
            phone: Set("01712345678".to_string()),
            department: Set("CSE".to_string()),
            password_hash: Set("irrelevant".to_string()),
            id_card_image: Set(None),
            profile_image: Set(None),
            is_verified: Set(true),
            otp: Set(None),
            otp_expires_at: Set(None),
            is_admin: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(db).await.expect("Failed to seed user");
    }

    async fn setup_test_store() -> (CommentStore, DatabaseConnection) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        seed_user(&db, "owner").await;
        seed_user(&db, "alice").await;
        seed_user(&db, "bob").await;
        (CommentStore::new(db.clone()), db)
    }

    async fn seed_item(db: &DatabaseConnection, posted_by: &str) -> item::Model {
        let now = Utc::now().timestamp();
        let model = item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            item_type: Set("found".to_string()),
            title: Set("Water bottle".to_string()),
            description: Set("Steel bottle left in lab 3".to_string()),
            location: Set("Lab 3".to_string()),
            image: Set(None),
            status: Set("active".to_string()),
            posted_by: Set(posted_by.to_string()),
            claimed_by: Set(None),
            view_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(db).await.expect("Failed to seed item")
    }

    #[tokio::test]
    async fn test_comment_on_missing_item_fails() {
        let (store, _db) = setup_test_store().await;

        let result = store.create("no-such-item", "alice", "nice find").await;

        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_only_author_edits_a_comment() {
        let (store, db) = setup_test_store().await;
        let item = seed_item(&db, "owner").await;
        let posted = store
            .create(&item.id, "alice", "I think I saw the owner")
            .await
            .expect("comment");

        let edited = store
            .update(&posted.id, "alice", "I saw the owner in block B")
            .await
            .expect("edit");
        assert_eq!(edited.content, "I saw the owner in block B");

        let foreign = store.update(&posted.id, "bob", "hijacked").await;
        assert!(matches!(foreign, Err(ItemError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_item_owner_may_delete_any_comment() {
        let (store, db) = setup_test_store().await;
        let item = seed_item(&db, "owner").await;
        let posted = store.create(&item.id, "alice", "spam").await.expect("comment");

        let stranger = store.delete(&posted.id, "bob").await;
        assert!(matches!(stranger, Err(ItemError::Forbidden(_))));

        store.delete(&posted.id, "owner").await.expect("owner delete");
        let remaining = store.list_for_item(&item.id).await.expect("list");
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_author() {
        let (store, db) = setup_test_store().await;
        let item = seed_item(&db, "owner").await;
        store.create(&item.id, "alice", "first").await.expect("comment");
        store.create(&item.id, "bob", "second").await.expect("comment");

        let all = store.list(None).await.expect("list");
        assert_eq!(all.len(), 2);

        let alices = store.list(Some("alice")).await.expect("list");
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].user_id, "alice");
    }
}
