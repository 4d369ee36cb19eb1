use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub department: String,
    pub password_hash: String,

    // Optional upload references; raw file storage lives outside this service
    pub id_card_image: Option<String>,
    pub profile_image: Option<String>,

    // OTP verification state
    pub is_verified: bool,
    pub otp: Option<String>,
    pub otp_expires_at: Option<i64>,

    pub is_admin: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
