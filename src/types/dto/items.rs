use poem_openapi::Object;

use crate::types::dto::requests::RequestView;
use crate::types::dto::user::UserSummary;
use crate::types::internal::bundle::ItemBundle;

/// An owner-authored question/answer pair supplied when posting a found item
#[derive(Object, Debug, Clone)]
pub struct ValidityQuestionInput {
    #[oai(validator(min_length = 1))]
    pub question: String,

    #[oai(validator(min_length = 1))]
    pub answer: String,
}

/// Request model for posting a lost or found item
#[derive(Object, Debug)]
pub struct CreateItemRequest {
    #[oai(validator(min_length = 1, max_length = 200))]
    pub title: String,

    #[oai(validator(min_length = 1))]
    pub description: String,

    #[oai(validator(min_length = 1, max_length = 200))]
    pub location: String,

    /// "lost" or "found"
    pub item_type: String,

    /// Reference to an uploaded photo
    pub image: Option<String>,

    /// Challenge questions gating claims; only meaningful for found items
    pub validity_questions: Option<Vec<ValidityQuestionInput>>,
}

/// Request model for editing an item; omitted fields are left unchanged.
/// The item's type is immutable and cannot be edited.
#[derive(Object, Debug)]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,

    /// Replaces the full ordered question list when present
    pub validity_questions: Option<Vec<ValidityQuestionInput>>,
}

/// A validity question as shown to a viewer; the answer is present only for
/// the item's owner and its current claimant
#[derive(Object, Debug)]
pub struct ValidityQuestionView {
    pub question: String,
    pub answer: Option<String>,
}

/// An item as shown to a concrete viewer, with answers redacted and
/// requests filtered per the visibility rules
#[derive(Object, Debug)]
pub struct ItemView {
    pub id: String,
    pub item_type: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub image: Option<String>,
    pub status: String,
    pub posted_by: Option<UserSummary>,
    pub claimed_by: Option<UserSummary>,
    pub view_count: i64,
    pub validity_questions: Vec<ValidityQuestionView>,
    pub requests: Vec<RequestView>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ItemView {
    /// The single choke point for read-path visibility: validity answers are
    /// released only to the owner or the current claimant, and a non-owner
    /// sees no requests but their own.
    pub fn from_bundle(bundle: &ItemBundle, viewer_id: &str) -> Self {
        let item = &bundle.item;
        let is_owner = viewer_id == item.posted_by;
        let is_claimant = item.claimed_by.as_deref() == Some(viewer_id);

        let validity_questions = bundle
            .questions
            .iter()
            .map(|q| ValidityQuestionView {
                question: q.question.clone(),
                answer: (is_owner || is_claimant).then(|| q.answer.clone()),
            })
            .collect();

        let requests = bundle
            .requests
            .iter()
            .filter(|r| is_owner || r.request.requested_by == viewer_id)
            .map(|r| RequestView::from_bundle(r, viewer_id, &item.posted_by))
            .collect();

        Self {
            id: item.id.clone(),
            item_type: item.item_type.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            location: item.location.clone(),
            image: item.image.clone(),
            status: item.status.clone(),
            posted_by: bundle.posted_by.as_ref().map(UserSummary::from_model),
            claimed_by: bundle.claimed_by.as_ref().map(UserSummary::from_model),
            view_count: item.view_count,
            validity_questions,
            requests,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Response wrapper for single-item operations
#[derive(Object, Debug)]
pub struct ItemResponse {
    pub success: bool,
    pub item: ItemView,
}

/// Response wrapper for item listings
#[derive(Object, Debug)]
pub struct ItemListResponse {
    pub success: bool,
    pub items: Vec<ItemView>,
}
