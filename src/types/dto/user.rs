use poem_openapi::Object;

use crate::types::db::user;

/// Public profile of an account, as embedded in items, requests and messages
#[derive(Object, Debug, Clone)]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub profile_image: Option<String>,
}

impl UserSummary {
    pub fn from_model(user: &user::Model) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            department: user.department.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// Full profile returned to the account holder
#[derive(Object, Debug)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub profile_image: Option<String>,
}

impl UserProfile {
    pub fn from_model(user: &user::Model) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            department: user.department.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// Response wrapper for profile lookups
#[derive(Object, Debug)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// Request model for profile updates; omitted fields are left unchanged
#[derive(Object, Debug)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub profile_image: Option<String>,

    /// Current password, required to authorize the update
    pub current_password: String,
}

/// Request model for password changes
#[derive(Object, Debug)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
