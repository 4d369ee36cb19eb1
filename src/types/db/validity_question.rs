use sea_orm::entity::prelude::*;

/// Owner-authored challenge question gating claims on a found item.
/// Ordered by `position` within the item.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "validity_questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub item_id: String,
    pub position: i32,
    pub question: String,
    // Never released to non-owners; see the redaction rules in the item store
    pub answer: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
