use poem_openapi::Object;

use crate::types::db::item_request;
use crate::types::dto::user::UserSummary;
use crate::types::internal::bundle::RequestBundle;
use crate::types::internal::status::RequestStatus;

/// Request model for submitting a claim on a found item
#[derive(Object, Debug)]
pub struct SubmitClaimRequest {
    /// One answer per validity question, in question order
    pub answers: Vec<String>,

    /// Free-form supporting detail for the owner
    pub additional_info: Option<String>,
}

/// Request model for informing the owner of a lost item
#[derive(Object, Debug)]
pub struct SubmitInformRequest {
    #[oai(validator(min_length = 1))]
    pub message: String,

    /// Reference to a supporting photo
    pub image: Option<String>,
}

/// Contact details shared with the requester on approval
#[derive(Object, Debug, Clone)]
pub struct ContactInfoInput {
    #[oai(validator(min_length = 1))]
    pub phone: String,

    pub alternate_phone: Option<String>,
    pub email: Option<String>,
    pub meeting_location: Option<String>,
    pub meeting_time: Option<String>,
    pub additional_notes: Option<String>,
}

/// Request model for approving a claim/inform request
#[derive(Object, Debug)]
pub struct ApproveRequestBody {
    pub contact_info: ContactInfoInput,
}

/// Request model for rejecting a claim/inform request
#[derive(Object, Debug)]
pub struct RejectRequestBody {
    pub rejection_reason: Option<String>,
}

/// Normalized contact block as released to the approved requester
#[derive(Object, Debug, Clone)]
pub struct ContactInfoView {
    pub phone: String,
    pub alternate_phone: String,
    pub email: String,
    pub meeting_location: String,
    pub meeting_time: String,
    pub additional_notes: String,
}

impl ContactInfoView {
    pub fn from_model(request: &item_request::Model) -> Self {
        Self {
            phone: request.contact_phone.clone().unwrap_or_default(),
            alternate_phone: request.contact_alternate_phone.clone().unwrap_or_default(),
            email: request.contact_email.clone().unwrap_or_default(),
            meeting_location: request.contact_meeting_location.clone().unwrap_or_default(),
            meeting_time: request.contact_meeting_time.clone().unwrap_or_default(),
            additional_notes: request.contact_notes.clone().unwrap_or_default(),
        }
    }

    /// Renders the block into the body of the contact-sharing message.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("Phone: {}", self.phone)];
        if !self.alternate_phone.is_empty() {
            lines.push(format!("Alternate phone: {}", self.alternate_phone));
        }
        if !self.email.is_empty() {
            lines.push(format!("Email: {}", self.email));
        }
        if !self.meeting_location.is_empty() {
            lines.push(format!("Meeting location: {}", self.meeting_location));
        }
        if !self.meeting_time.is_empty() {
            lines.push(format!("Meeting time: {}", self.meeting_time));
        }
        if !self.additional_notes.is_empty() {
            lines.push(format!("Notes: {}", self.additional_notes));
        }
        lines.join("\n")
    }
}

/// A claim/inform request as shown to a participant
#[derive(Object, Debug)]
pub struct RequestView {
    pub id: String,
    pub kind: String,
    pub requested_by: Option<UserSummary>,
    pub answers: Option<Vec<String>>,
    pub additional_info: Option<String>,
    pub message: Option<String>,
    pub image: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<i64>,

    /// Present only once the request is approved
    pub contact_info: Option<ContactInfoView>,

    pub created_at: i64,
}

impl RequestView {
    /// Builds the view a given participant may see. The contact block is
    /// released only after approval, and only to the requester or the
    /// reviewing owner.
    pub fn from_bundle(bundle: &RequestBundle, viewer_id: &str, owner_id: &str) -> Self {
        let request = &bundle.request;
        let approved = RequestStatus::parse(&request.status) == Some(RequestStatus::Approved);
        let participant = viewer_id == request.requested_by || viewer_id == owner_id;

        let answers = request
            .answers
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok());

        Self {
            id: request.id.clone(),
            kind: request.kind.clone(),
            requested_by: bundle.requested_by.as_ref().map(UserSummary::from_model),
            answers,
            additional_info: request.additional_info.clone(),
            message: request.message.clone(),
            image: request.image.clone(),
            status: request.status.clone(),
            rejection_reason: request.rejection_reason.clone(),
            reviewed_at: request.reviewed_at,
            contact_info: (approved && participant)
                .then(|| ContactInfoView::from_model(request)),
            created_at: request.created_at,
        }
    }
}

/// Response wrapper for the rejection-reason lookup
#[derive(Object, Debug)]
pub struct RejectionReasonResponse {
    pub success: bool,
    pub rejection_reason: String,
}

/// Response wrapper for the contact-info lookup
#[derive(Object, Debug)]
pub struct ContactInfoResponse {
    pub success: bool,
    pub contact_info: ContactInfoView,
}
