use sea_orm::DatabaseConnection;

use crate::stores::{MessageStore, NotificationStore};
use crate::types::db::{item, user};
use crate::types::dto::requests::ContactInfoView;
use crate::types::internal::status::RequestKind;

/// Message kind for ordinary user-to-user messages
pub const MESSAGE_KIND_CHAT: &str = "chat";
/// Message kind for the contact block released on approval
pub const MESSAGE_KIND_CONTACT_SHARE: &str = "contact_share";

/// Fan-out of user-visible side effects for reconciliation transitions.
///
/// Every method is best-effort: the item state transition has already been
/// committed by the time these run, so persistence failures are logged and
/// swallowed rather than bubbled up to the caller.
pub struct Notifier {
    messages: MessageStore,
    notifications: NotificationStore,
}

impl Notifier {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            messages: MessageStore::new(db.clone()),
            notifications: NotificationStore::new(db),
        }
    }

    /// A new pending request was appended: notify the owner (actionable),
    /// acknowledge the requester, and open a message thread between them.
    pub async fn request_submitted(
        &self,
        item: &item::Model,
        requester: &user::Model,
        kind: RequestKind,
    ) {
        let requester_name = format!("{} {}", requester.first_name, requester.last_name);

        let owner_body = format!(
            "{} sent a {} request for your {} item \"{}\". Please review the request.",
            requester_name,
            kind.as_str(),
            item.item_type,
            item.title
        );
        self.emit_notification(&item.posted_by, "request_received", item, &owner_body)
            .await;

        let requester_body = format!(
            "Your {} request for \"{}\" has been submitted.",
            kind.as_str(),
            item.title
        );
        self.emit_notification(&requester.id, "request_submitted", item, &requester_body)
            .await;

        self.emit_message(&requester.id, &item.posted_by, &owner_body, MESSAGE_KIND_CHAT)
            .await;
    }

    /// A request was approved: release the contact block to the requester
    /// and notify both parties.
    pub async fn request_approved(
        &self,
        item: &item::Model,
        requester_id: &str,
        reviewer_id: &str,
        contact: &ContactInfoView,
    ) {
        let contact_body = format!(
            "Your request for the {} item \"{}\" has been approved. Contact details:\n{}",
            item.item_type,
            item.title,
            contact.render()
        );
        self.emit_message(
            reviewer_id,
            requester_id,
            &contact_body,
            MESSAGE_KIND_CONTACT_SHARE,
        )
        .await;

        let requester_body = format!(
            "Your request for \"{}\" has been approved. Check your messages for contact details.",
            item.title
        );
        self.emit_notification(requester_id, "request_approved", item, &requester_body)
            .await;

        let reviewer_body = format!("\"{}\" has been successfully resolved.", item.title);
        self.emit_notification(reviewer_id, "item_resolved", item, &reviewer_body)
            .await;
    }

    /// A request was rejected: tell the requester; the item stays open.
    pub async fn request_rejected(&self, item: &item::Model, requester_id: &str, reviewer_id: &str) {
        let body = format!(
            "Your request for the {} item \"{}\" has been rejected.",
            item.item_type, item.title
        );
        self.emit_notification(requester_id, "request_rejected", item, &body)
            .await;
        self.emit_message(reviewer_id, requester_id, &body, MESSAGE_KIND_CHAT)
            .await;
    }

    async fn emit_notification(&self, user_id: &str, kind: &str, item: &item::Model, body: &str) {
        if let Err(cause) = self
            .notifications
            .emit(user_id, kind, Some(&item.id), body)
            .await
        {
            tracing::warn!(%cause, user_id, kind, item_id = %item.id, "failed to persist notification");
        }
    }

    async fn emit_message(&self, sender: &str, receiver: &str, content: &str, kind: &str) {
        if let Err(cause) = self.messages.send(sender, receiver, content, kind).await {
            tracing::warn!(%cause, sender, receiver, kind, "failed to persist message");
        }
    }
}
