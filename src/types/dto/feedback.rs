use poem_openapi::Object;

use crate::types::db::{comment, suggestion};
use crate::types::dto::user::UserSummary;

/// Request model for posting or editing a comment
#[derive(Object, Debug)]
pub struct CommentBody {
    #[oai(validator(min_length = 1))]
    pub content: String,
}

/// A comment under an item, with its author's public profile
#[derive(Object, Debug)]
pub struct CommentView {
    pub id: String,
    pub item_id: String,
    pub content: String,
    pub posted_by: Option<UserSummary>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CommentView {
    pub fn from_model(comment: &comment::Model, posted_by: Option<UserSummary>) -> Self {
        Self {
            id: comment.id.clone(),
            item_id: comment.item_id.clone(),
            content: comment.content.clone(),
            posted_by,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Response wrapper for a single comment
#[derive(Object, Debug)]
pub struct CommentResponse {
    pub success: bool,
    pub comment: CommentView,
}

/// Response wrapper for comment listings
#[derive(Object, Debug)]
pub struct CommentListResponse {
    pub success: bool,
    pub comments: Vec<CommentView>,
}

/// Request model for posting or editing a suggestion
#[derive(Object, Debug)]
pub struct SuggestionBody {
    #[oai(validator(min_length = 1))]
    pub content: String,
}

/// A platform suggestion with its author's public profile
#[derive(Object, Debug)]
pub struct SuggestionView {
    pub id: String,
    pub content: String,
    pub posted_by: Option<UserSummary>,
    pub created_at: i64,
}

impl SuggestionView {
    pub fn from_model(suggestion: &suggestion::Model, posted_by: Option<UserSummary>) -> Self {
        Self {
            id: suggestion.id.clone(),
            content: suggestion.content.clone(),
            posted_by,
            created_at: suggestion.created_at,
        }
    }
}

/// Response wrapper for a single suggestion
#[derive(Object, Debug)]
pub struct SuggestionResponse {
    pub success: bool,
    pub suggestion: SuggestionView,
}

/// Response wrapper for suggestion listings
#[derive(Object, Debug)]
pub struct SuggestionListResponse {
    pub success: bool,
    pub suggestions: Vec<SuggestionView>,
}
