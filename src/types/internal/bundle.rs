use crate::types::db::{item, item_request, user, validity_question};

/// An item together with everything the read paths need to render it:
/// its ordered validity questions, its requests, and the profiles of the
/// users involved. Assembled by the item store; redaction happens when the
/// bundle is converted into a DTO for a concrete viewer.
#[derive(Debug, Clone)]
pub struct ItemBundle {
    pub item: item::Model,
    pub questions: Vec<validity_question::Model>,
    pub requests: Vec<RequestBundle>,
    pub posted_by: Option<user::Model>,
    pub claimed_by: Option<user::Model>,
}

/// A request row joined with its requester's profile.
#[derive(Debug, Clone)]
pub struct RequestBundle {
    pub request: item_request::Model,
    pub requested_by: Option<user::Model>,
}
