use std::collections::HashMap;
use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::auth::AuthError;
use crate::services::{TokenService, MESSAGE_KIND_CHAT};
use crate::stores::{MessageStore, UserStore};
use crate::types::dto::common::AckResponse;
use crate::types::dto::messaging::{
    MessageListResponse, MessageResponse, MessageView, SendMessageRequest,
};
use crate::types::dto::user::UserSummary;

/// Direct-message endpoints. Contact-share messages emitted by the
/// reconciliation workflow surface here alongside ordinary chat.
pub struct MessagesApi {
    message_store: Arc<MessageStore>,
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl MessagesApi {
    pub fn new(
        message_store: Arc<MessageStore>,
        user_store: Arc<UserStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            message_store,
            user_store,
            token_service,
        }
    }

    fn current_user(&self, auth: &BearerAuth) -> Result<String, AuthError> {
        let claims = self.token_service.validate_jwt(&auth.0.token)?;
        Ok(claims.sub)
    }

    async fn summaries_for(
        &self,
        messages: &[crate::types::db::message::Model],
    ) -> Result<HashMap<String, UserSummary>, AuthError> {
        let ids: std::collections::HashSet<String> = messages
            .iter()
            .flat_map(|m| [m.sender.clone(), m.receiver.clone()])
            .collect();
        let users = self.user_store.find_many(ids).await?;
        Ok(users
            .iter()
            .map(|u| (u.id.clone(), UserSummary::from_model(u)))
            .collect())
    }
}

/// API tags for messaging endpoints
#[derive(Tags)]
enum MessageTags {
    /// Direct messaging endpoints
    Messages,
}

#[OpenApi(prefix_path = "/messages")]
impl MessagesApi {
    /// Send a direct message to another user
    #[oai(path = "/", method = "post", tag = "MessageTags::Messages")]
    async fn send_message(
        &self,
        auth: BearerAuth,
        body: Json<SendMessageRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;

        // Reject sends into the void
        let receiver = self.user_store.find_by_id(&body.receiver).await?;
        let sender = self.user_store.find_by_id(&user_id).await?;

        let message = self
            .message_store
            .send(&user_id, &receiver.id, &body.content, MESSAGE_KIND_CHAT)
            .await
            .map_err(AuthError::internal_error)?;

        Ok(Json(MessageResponse {
            success: true,
            message: MessageView::from_model(
                &message,
                Some(UserSummary::from_model(&sender)),
                Some(UserSummary::from_model(&receiver)),
            ),
        }))
    }

    /// The caller's messages, newest first; `partner` narrows to one
    /// conversation
    #[oai(path = "/", method = "get", tag = "MessageTags::Messages")]
    async fn list_messages(
        &self,
        auth: BearerAuth,
        partner: Query<Option<String>>,
    ) -> Result<Json<MessageListResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;

        let messages = self
            .message_store
            .list_for_user(&user_id, partner.0.as_deref())
            .await
            .map_err(AuthError::internal_error)?;

        let summaries = self.summaries_for(&messages).await?;
        let views = messages
            .iter()
            .map(|m| {
                MessageView::from_model(
                    m,
                    summaries.get(&m.sender).cloned(),
                    summaries.get(&m.receiver).cloned(),
                )
            })
            .collect();

        Ok(Json(MessageListResponse {
            success: true,
            messages: views,
        }))
    }

    /// Mark the conversation with one user as read
    #[oai(path = "/:partner_id/read", method = "post", tag = "MessageTags::Messages")]
    async fn mark_conversation_read(
        &self,
        auth: BearerAuth,
        partner_id: Path<String>,
    ) -> Result<Json<AckResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;

        let marked = self
            .message_store
            .mark_conversation_read(&user_id, &partner_id.0)
            .await
            .map_err(AuthError::internal_error)?;

        Ok(Json(AckResponse {
            success: true,
            message: format!("{} messages marked as read", marked),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::user_store::NewUser;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    async fn setup_test_api() -> (MessagesApi, Arc<UserStore>, Arc<TokenService>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));
        let api = MessagesApi::new(
            Arc::new(MessageStore::new(db)),
            user_store.clone(),
            token_service.clone(),
        );
        (api, user_store, token_service)
    }

    async fn login_new_user(
        user_store: &UserStore,
        token_service: &TokenService,
        student_number: &str,
    ) -> (String, BearerAuth) {
        let account = user_store
            .register(NewUser {
                first_name: "Student".to_string(),
                last_name: student_number.to_string(),
                email: format!("{}@student.bup.edu.bd", student_number),
                phone: "01712345678".to_string(),
                department: "CSE".to_string(),
                password: "correct horse battery".to_string(),
                id_card_image: None,
            })
            .await
            .expect("register");

        let user_id = uuid::Uuid::parse_str(&account.id).expect("uuid");
        let token = token_service.generate_jwt(&user_id).expect("token");
        (account.id, BearerAuth(Bearer { token }))
    }

    #[tokio::test]
    async fn test_send_and_list_with_profiles() {
        let (api, user_store, token_service) = setup_test_api().await;
        let (alice_id, alice) = login_new_user(&user_store, &token_service, "2052010001").await;
        let (bob_id, bob) = login_new_user(&user_store, &token_service, "2052010002").await;

        let sent = api
            .send_message(
                alice,
                Json(SendMessageRequest {
                    receiver: bob_id.clone(),
                    content: "Is this your umbrella?".to_string(),
                }),
            )
            .await
            .expect("send");
        assert_eq!(sent.message.kind, "chat");

        let inbox = api
            .list_messages(bob, Query(None))
            .await
            .expect("list");
        assert_eq!(inbox.messages.len(), 1);
        assert_eq!(
            inbox.messages[0].sender.as_ref().map(|u| u.id.clone()),
            Some(alice_id)
        );
    }

    #[tokio::test]
    async fn test_send_to_unknown_user_fails() {
        let (api, user_store, token_service) = setup_test_api().await;
        let (_alice_id, alice) = login_new_user(&user_store, &token_service, "2052010001").await;

        let result = api
            .send_message(
                alice,
                Json(SendMessageRequest {
                    receiver: "no-such-user".to_string(),
                    content: "hello?".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(AuthError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_mark_conversation_read() {
        let (api, user_store, token_service) = setup_test_api().await;
        let (alice_id, alice) = login_new_user(&user_store, &token_service, "2052010001").await;
        let (bob_id, bob) = login_new_user(&user_store, &token_service, "2052010002").await;

        api.send_message(
            alice,
            Json(SendMessageRequest {
                receiver: bob_id,
                content: "ping".to_string(),
            }),
        )
        .await
        .expect("send");

        let ack = api
            .mark_conversation_read(bob, Path(alice_id))
            .await
            .expect("mark read");
        assert!(ack.message.starts_with("1 "));
    }
}
