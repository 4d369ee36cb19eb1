use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid email or password
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Account exists but the email has not been verified yet
    #[oai(status = 401)]
    NotVerified(Json<AuthErrorResponse>),

    /// No account for the given id or email
    #[oai(status = 404)]
    UserNotFound(Json<AuthErrorResponse>),

    /// An account with this email already exists
    #[oai(status = 400)]
    DuplicateEmail(Json<AuthErrorResponse>),

    /// OTP is wrong, expired, or was never issued
    #[oai(status = 400)]
    InvalidOtp(Json<AuthErrorResponse>),

    /// Malformed registration fields (email/phone format)
    #[oai(status = 400)]
    Validation(Json<AuthErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid email or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a NotVerified error
    pub fn not_verified() -> Self {
        AuthError::NotVerified(Json(AuthErrorResponse {
            error: "not_verified".to_string(),
            message: "Please verify your email first".to_string(),
            status_code: 401,
        }))
    }

    /// Create a UserNotFound error
    pub fn user_not_found() -> Self {
        AuthError::UserNotFound(Json(AuthErrorResponse {
            error: "user_not_found".to_string(),
            message: "User not found".to_string(),
            status_code: 404,
        }))
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(AuthErrorResponse {
            error: "duplicate_email".to_string(),
            message: "User already exists".to_string(),
            status_code: 400,
        }))
    }

    /// Create an InvalidOtp error
    pub fn invalid_otp() -> Self {
        AuthError::InvalidOtp(Json(AuthErrorResponse {
            error: "invalid_otp".to_string(),
            message: "Invalid or expired OTP".to_string(),
            status_code: 400,
        }))
    }

    /// Create a Validation error with a field-specific message
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(Json(AuthErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(AuthErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed JWT".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(AuthErrorResponse {
            error: "expired_token".to_string(),
            message: "JWT has expired".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InternalError. The cause is logged server-side; the caller
    /// only ever sees a generic message.
    pub fn internal_error(cause: impl fmt::Display) -> Self {
        tracing::error!(%cause, "auth operation failed");
        AuthError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message: "Server error".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::NotVerified(json) => json.0.message.clone(),
            AuthError::UserNotFound(json) => json.0.message.clone(),
            AuthError::DuplicateEmail(json) => json.0.message.clone(),
            AuthError::InvalidOtp(json) => json.0.message.clone(),
            AuthError::Validation(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
