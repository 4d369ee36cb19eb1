use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::auth::AuthError;
use crate::services::TokenService;
use crate::stores::NotificationStore;
use crate::types::dto::common::AckResponse;
use crate::types::dto::messaging::{NotificationListResponse, NotificationView};

/// Notification endpoints for the notices emitted by the reconciliation
/// workflow
pub struct NotificationsApi {
    notification_store: Arc<NotificationStore>,
    token_service: Arc<TokenService>,
}

impl NotificationsApi {
    pub fn new(
        notification_store: Arc<NotificationStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            notification_store,
            token_service,
        }
    }

    fn current_user(&self, auth: &BearerAuth) -> Result<String, AuthError> {
        let claims = self.token_service.validate_jwt(&auth.0.token)?;
        Ok(claims.sub)
    }
}

/// API tags for notification endpoints
#[derive(Tags)]
enum NotificationTags {
    /// Notification endpoints
    Notifications,
}

#[OpenApi(prefix_path = "/notifications")]
impl NotificationsApi {
    /// The caller's notifications, newest first
    #[oai(path = "/", method = "get", tag = "NotificationTags::Notifications")]
    async fn list_notifications(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<NotificationListResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;

        let notifications = self
            .notification_store
            .list_for_user(&user_id)
            .await
            .map_err(AuthError::internal_error)?;

        Ok(Json(NotificationListResponse {
            success: true,
            notifications: notifications.iter().map(NotificationView::from_model).collect(),
        }))
    }

    /// Mark one notification as read
    #[oai(
        path = "/:notification_id/read",
        method = "post",
        tag = "NotificationTags::Notifications"
    )]
    async fn mark_read(
        &self,
        auth: BearerAuth,
        notification_id: Path<String>,
    ) -> Result<Json<AckResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;

        let marked = self
            .notification_store
            .mark_read(&user_id, &notification_id.0)
            .await
            .map_err(AuthError::internal_error)?;
        if marked == 0 {
            return Err(AuthError::validation("Notification not found"));
        }

        Ok(Json(AckResponse {
            success: true,
            message: "Notification marked as read".to_string(),
        }))
    }

    /// Mark every unread notification as read
    #[oai(path = "/read-all", method = "post", tag = "NotificationTags::Notifications")]
    async fn mark_all_read(&self, auth: BearerAuth) -> Result<Json<AckResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;

        let marked = self
            .notification_store
            .mark_all_read(&user_id)
            .await
            .map_err(AuthError::internal_error)?;

        Ok(Json(AckResponse {
            success: true,
            message: format!("{} notifications marked as read", marked),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::user;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use uuid::Uuid;

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

    async fn setup_test_api() -> (
        NotificationsApi,
        Arc<NotificationStore>,
        Arc<TokenService>,
        DatabaseConnection,
    ) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let notification_store = Arc::new(NotificationStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));
        let api = NotificationsApi::new(notification_store.clone(), token_service.clone());
        (api, notification_store, token_service, db)
    }

    fn bearer_for(token_service: &TokenService, user_id: &Uuid) -> BearerAuth {
        let token = token_service.generate_jwt(user_id).expect("token");
        BearerAuth(Bearer { token })
    }

    #[tokio::test]
    async fn test_list_and_mark_read() {
        let (api, store, token_service, db) = setup_test_api().await;
        let user_id = Uuid::new_v4();
        seed_user(&db, &user_id.to_string()).await;

        store
            .emit(&user_id.to_string(), "request_received", None, "new request")
            .await
            .expect("emit");

        let auth = bearer_for(&token_service, &user_id);
        let listed = api.list_notifications(auth).await.expect("list");
        assert_eq!(listed.notifications.len(), 1);
        assert!(!listed.notifications[0].read);

        let auth = bearer_for(&token_service, &user_id);
        api.mark_read(auth, Path(listed.notifications[0].id.clone()))
            .await
            .expect("mark read");

        let auth = bearer_for(&token_service, &user_id);
        let after = api.list_notifications(auth).await.expect("list again");
        assert!(after.notifications[0].read);
    }

    #[tokio::test]
    async fn test_cannot_mark_foreign_notification() {
        let (api, store, token_service, db) = setup_test_api().await;
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        seed_user(&db, &owner.to_string()).await;

        let notification = store
            .emit(&owner.to_string(), "request_received", None, "private")
            .await
            .expect("emit");

        let auth = bearer_for(&token_service, &intruder);
        let result = api.mark_read(auth, Path(notification.id)).await;

        assert!(matches!(result, Err(AuthError::Validation(_))));
    }
}
