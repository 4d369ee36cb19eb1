use sea_orm::entity::prelude::*;

/// A claim (found item) or inform (lost item) petition against an item.
///
/// Claim rows carry `answers` (JSON array of strings, one per validity
/// question) and optionally `additional_info`. Inform rows carry `message`
/// and optionally `image`. The contact_* columns are populated exactly once,
/// on approval, and are the only durable payload released to the requester.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "item_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub item_id: String,

    // "claim" | "inform"; always matches the item's type
    pub kind: String,

    pub requested_by: String,

    pub answers: Option<String>,
    pub additional_info: Option<String>,
    pub message: Option<String>,
    pub image: Option<String>,

    // "pending" | "approved" | "rejected"
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,

    pub contact_phone: Option<String>,
    pub contact_alternate_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_meeting_location: Option<String>,
    pub contact_meeting_time: Option<String>,
    pub contact_notes: Option<String>,

    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
