use poem_openapi::Object;

use crate::types::dto::user::UserProfile;

/// Request model for account registration
#[derive(Object, Debug)]
pub struct RegisterRequest {
    #[oai(validator(min_length = 1, max_length = 100))]
    pub first_name: String,

    #[oai(validator(min_length = 1, max_length = 100))]
    pub last_name: String,

    /// University email address
    pub email: String,

    /// Phone number in local format (11 digits starting with 01)
    pub phone: String,

    #[oai(validator(min_length = 1, max_length = 100))]
    pub department: String,

    #[oai(validator(min_length = 8))]
    pub password: String,

    /// Reference to the uploaded identity-card image
    pub id_card_image: Option<String>,
}

/// Response model for registration; the account stays unusable until the
/// emailed OTP is verified
#[derive(Object, Debug)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

/// Request model for OTP verification (registration and password reset)
#[derive(Object, Debug)]
pub struct VerifyOtpRequest {
    pub user_id: String,
    pub otp: String,
}

/// Request model for re-issuing an OTP
#[derive(Object, Debug)]
pub struct ResendOtpRequest {
    pub user_id: String,
}

/// Request model for the first login step (password check, OTP issue)
#[derive(Object, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response model for the first login step
#[derive(Object, Debug)]
pub struct LoginStartResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

/// Request model for the second login step (OTP check, token issue)
#[derive(Object, Debug)]
pub struct VerifyLoginRequest {
    pub user_id: String,
    pub otp: String,
}

/// Response model for a completed login
#[derive(Object, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,

    /// Bearer token for subsequent requests
    pub token: String,

    pub user: UserProfile,
}

/// Request model for starting a password reset
#[derive(Object, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Response model for a started password reset; carries the user id the
/// client must echo back with the OTP
#[derive(Object, Debug)]
pub struct ForgotPasswordResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

/// Request model for completing a password reset
#[derive(Object, Debug)]
pub struct ResetPasswordRequest {
    pub user_id: String,
    pub otp: String,

    #[oai(validator(min_length = 8))]
    pub new_password: String,
}
