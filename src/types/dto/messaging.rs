use poem_openapi::Object;

use crate::types::db::{message, notification};
use crate::types::dto::user::UserSummary;

/// Request model for sending a direct message
#[derive(Object, Debug)]
pub struct SendMessageRequest {
    /// Receiving user's id
    pub receiver: String,

    #[oai(validator(min_length = 1))]
    pub content: String,
}

/// A direct message between two users
#[derive(Object, Debug)]
pub struct MessageView {
    pub id: String,
    pub sender: Option<UserSummary>,
    pub receiver: Option<UserSummary>,
    pub content: String,
    /// "chat" for user-to-user messages, "contact_share" for the contact
    /// block sent on claim approval
    pub kind: String,
    pub read: bool,
    pub created_at: i64,
}

impl MessageView {
    pub fn from_model(
        message: &message::Model,
        sender: Option<UserSummary>,
        receiver: Option<UserSummary>,
    ) -> Self {
        Self {
            id: message.id.clone(),
            sender,
            receiver,
            content: message.content.clone(),
            kind: message.kind.clone(),
            read: message.read,
            created_at: message.created_at,
        }
    }
}

/// Response wrapper for message listings
#[derive(Object, Debug)]
pub struct MessageListResponse {
    pub success: bool,
    pub messages: Vec<MessageView>,
}

/// Response wrapper for a sent message
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: MessageView,
}

/// A user-visible notice emitted by the reconciliation workflow
#[derive(Object, Debug)]
pub struct NotificationView {
    pub id: String,
    pub kind: String,
    pub item_id: Option<String>,
    pub body: String,
    pub read: bool,
    pub created_at: i64,
}

impl NotificationView {
    pub fn from_model(notification: &notification::Model) -> Self {
        Self {
            id: notification.id.clone(),
            kind: notification.kind.clone(),
            item_id: notification.item_id.clone(),
            body: notification.body.clone(),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

/// Response wrapper for notification listings
#[derive(Object, Debug)]
pub struct NotificationListResponse {
    pub success: bool,
    pub notifications: Vec<NotificationView>,
}
