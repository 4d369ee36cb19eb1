use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::types::internal::status::RequestKind;

/// Standardized error response for item and request endpoints
#[derive(Object, Debug)]
pub struct ItemErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,

    /// Discriminator for duplicate-pending submissions
    /// ("duplicate_claim" / "duplicate_inform"), letting the client show a
    /// specific message
    pub warning_type: Option<String>,

    /// Question texts echoed back when a claim arrives with the wrong
    /// number of answers, so the client can re-prompt. Stored answers are
    /// never included.
    pub validity_questions: Option<Vec<String>>,
}

impl ItemErrorResponse {
    fn plain(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
            warning_type: None,
            validity_questions: None,
        }
    }
}

/// Item registry error types, covering the full reconciliation taxonomy
#[derive(ApiResponse, Debug)]
pub enum ItemError {
    /// Missing, invalid, or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ItemErrorResponse>),

    /// Item, request, or referenced user does not exist
    #[oai(status = 404)]
    NotFound(Json<ItemErrorResponse>),

    /// Caller is not authorized for this operation (wrong owner)
    #[oai(status = 403)]
    Forbidden(Json<ItemErrorResponse>),

    /// Missing or malformed required fields
    #[oai(status = 400)]
    Validation(Json<ItemErrorResponse>),

    /// Item or request is not in the status the operation expects
    #[oai(status = 400)]
    Conflict(Json<ItemErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ItemErrorResponse>),
}

impl ItemError {
    /// Create an Unauthorized error carrying the token failure message
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ItemError::Unauthorized(Json(ItemErrorResponse::plain(
            "unauthorized",
            message,
            401,
        )))
    }

    /// Create a NotFound error for a named entity
    pub fn not_found(entity: &str) -> Self {
        ItemError::NotFound(Json(ItemErrorResponse::plain(
            "not_found",
            format!("{} not found", entity),
            404,
        )))
    }

    /// Create a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        ItemError::Forbidden(Json(ItemErrorResponse::plain(
            "forbidden", message, 403,
        )))
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ItemError::Validation(Json(ItemErrorResponse::plain(
            "validation_error",
            message,
            400,
        )))
    }

    /// Claim arrived with the wrong number of answers; echo the question
    /// texts (never the stored answers) so the client can re-prompt
    pub fn incomplete_answers(questions: Vec<String>) -> Self {
        ItemError::Validation(Json(ItemErrorResponse {
            error: "incomplete_answers".to_string(),
            message: "Please answer every validity question".to_string(),
            status_code: 400,
            warning_type: None,
            validity_questions: Some(questions),
        }))
    }

    /// The wrong request kind for this item type (claim on lost, inform on
    /// found)
    pub fn invalid_kind(kind: RequestKind) -> Self {
        let message = match kind {
            RequestKind::Claim => "Claim requests are only accepted on found items",
            RequestKind::Inform => "Inform requests are only accepted on lost items",
        };
        ItemError::validation(message)
    }

    /// Item is no longer active; it has already been claimed
    pub fn already_resolved() -> Self {
        ItemError::Conflict(Json(ItemErrorResponse::plain(
            "already_resolved",
            "Item is already claimed by another user",
            400,
        )))
    }

    /// Owner attempted a request on their own item
    pub fn self_request() -> Self {
        ItemError::Conflict(Json(ItemErrorResponse::plain(
            "self_request",
            "You cannot submit a request on your own item",
            400,
        )))
    }

    /// Requester already has a pending request on this item; carries the
    /// kind-specific warning discriminator
    pub fn duplicate_pending(kind: RequestKind) -> Self {
        ItemError::Conflict(Json(ItemErrorResponse {
            error: "duplicate_request".to_string(),
            message: "You already have a pending request on this item".to_string(),
            status_code: 400,
            warning_type: Some(kind.duplicate_warning().to_string()),
            validity_questions: None,
        }))
    }

    /// Request or item is not in the expected status
    pub fn conflict(message: impl Into<String>) -> Self {
        ItemError::Conflict(Json(ItemErrorResponse::plain(
            "conflict", message, 400,
        )))
    }

    /// Rejection-reason lookup on a request that is not rejected
    pub fn not_rejected() -> Self {
        ItemError::Conflict(Json(ItemErrorResponse::plain(
            "not_rejected",
            "Request has not been rejected",
            400,
        )))
    }

    /// Create an InternalError. The cause is logged server-side; the caller
    /// only ever sees a generic message.
    pub fn internal_error(cause: impl fmt::Display) -> Self {
        tracing::error!(%cause, "item operation failed");
        ItemError::InternalError(Json(ItemErrorResponse::plain(
            "internal_error",
            "Server error",
            500,
        )))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ItemError::Unauthorized(json) => json.0.message.clone(),
            ItemError::NotFound(json) => json.0.message.clone(),
            ItemError::Forbidden(json) => json.0.message.clone(),
            ItemError::Validation(json) => json.0.message.clone(),
            ItemError::Conflict(json) => json.0.message.clone(),
            ItemError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Warning discriminator, when this error carries one
    pub fn warning_type(&self) -> Option<&str> {
        match self {
            ItemError::Conflict(json) => json.0.warning_type.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_pending_carries_kind_discriminator() {
        let claim = ItemError::duplicate_pending(RequestKind::Claim);
        assert_eq!(claim.warning_type(), Some("duplicate_claim"));

        let inform = ItemError::duplicate_pending(RequestKind::Inform);
        assert_eq!(inform.warning_type(), Some("duplicate_inform"));
    }

    #[test]
    fn test_incomplete_answers_echoes_questions_only() {
        let err = ItemError::incomplete_answers(vec![
            "What color is it?".to_string(),
            "Where was it lost?".to_string(),
        ]);
        match err {
            ItemError::Validation(json) => {
                let questions = json.0.validity_questions.expect("questions echoed");
                assert_eq!(questions.len(), 2);
                assert_eq!(questions[0], "What color is it?");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_internal_error_is_generic() {
        let err = ItemError::internal_error("connection reset by peer");
        assert_eq!(err.message(), "Server error");
    }
}
