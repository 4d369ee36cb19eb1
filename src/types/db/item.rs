use sea_orm::entity::prelude::*;

/// A lost or found item posting.
///
/// `status` only ever holds "active" or "claimed". Earlier schema revisions
/// also carried "accepted"/"rejected" on the item itself, but the request
/// workflow made those unreachable and they are not representable here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    // "lost" | "found"; immutable after creation
    pub item_type: String,

    pub title: String,
    pub description: String,
    pub location: String,
    pub image: Option<String>,

    // "active" | "claimed"
    pub status: String,

    pub posted_by: String,
    pub claimed_by: Option<String>,

    pub view_count: i64,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
