use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::errors::auth::AuthError;
use crate::services::{OtpService, TokenService};
use crate::stores::user_store::NewUser;
use crate::stores::UserStore;
use crate::types::dto::auth::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse,
    LoginStartResponse, RegisterRequest, RegisterResponse, ResendOtpRequest,
    ResetPasswordRequest, VerifyLoginRequest, VerifyOtpRequest,
};
use crate::types::dto::common::AckResponse;
use crate::types::dto::user::UserProfile;

/// Authentication API endpoints: registration, the two-step OTP login, and
/// password reset. Email delivery of the codes happens outside this service;
/// issued codes are logged so development flows stay usable without a relay.
pub struct AuthApi {
    user_store: Arc<UserStore>,
    otp_service: Arc<OtpService>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(
        user_store: Arc<UserStore>,
        otp_service: Arc<OtpService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_store,
            otp_service,
            token_service,
        }
    }

    async fn issue_otp(&self, user_id: &str, purpose: &str) -> Result<(), AuthError> {
        let (otp, expires_at) = self.otp_service.generate();
        self.user_store.set_otp(user_id, &otp, expires_at).await?;
        tracing::info!(user_id, purpose, otp, "issued one-time code");
        Ok(())
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account and email it a verification code
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<RegisterResponse>, AuthError> {
        let body = body.0;
        let account = self
            .user_store
            .register(NewUser {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                phone: body.phone,
                department: body.department,
                password: body.password,
                id_card_image: body.id_card_image,
            })
            .await?;

        self.issue_otp(&account.id, "registration").await?;

        Ok(Json(RegisterResponse {
            success: true,
            message: "Registration successful. Please verify your email with the OTP sent."
                .to_string(),
            user_id: account.id,
        }))
    }

    /// Verify the emailed registration code and activate the account
    #[oai(path = "/verify-otp", method = "post", tag = "AuthTags::Authentication")]
    async fn verify_otp(&self, body: Json<VerifyOtpRequest>) -> Result<Json<AckResponse>, AuthError> {
        let account = self.user_store.find_by_id(&body.user_id).await?;

        if !self
            .otp_service
            .verify(account.otp.as_deref(), account.otp_expires_at, &body.otp)
        {
            return Err(AuthError::invalid_otp());
        }

        self.user_store.consume_otp(&account.id, true).await?;

        Ok(Json(AckResponse {
            success: true,
            message: "Email verified successfully".to_string(),
        }))
    }

    /// Re-issue the verification code for an account
    #[oai(path = "/resend-otp", method = "post", tag = "AuthTags::Authentication")]
    async fn resend_otp(&self, body: Json<ResendOtpRequest>) -> Result<Json<AckResponse>, AuthError> {
        let account = self.user_store.find_by_id(&body.user_id).await?;
        self.issue_otp(&account.id, "resend").await?;

        Ok(Json(AckResponse {
            success: true,
            message: "A new OTP has been sent".to_string(),
        }))
    }

    /// First login step: check the password and issue a login code
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginStartResponse>, AuthError> {
        let account = self
            .user_store
            .verify_credentials(&body.email, &body.password)
            .await
            .map_err(|err| match err {
                // Do not reveal whether the address is registered
                AuthError::UserNotFound(_) => AuthError::invalid_credentials(),
                other => other,
            })?;

        if !account.is_verified {
            return Err(AuthError::not_verified());
        }

        self.issue_otp(&account.id, "login").await?;

        Ok(Json(LoginStartResponse {
            success: true,
            message: "OTP sent to your email".to_string(),
            user_id: account.id,
        }))
    }

    /// Second login step: check the login code and issue a bearer token
    #[oai(path = "/verify-login", method = "post", tag = "AuthTags::Authentication")]
    async fn verify_login(
        &self,
        body: Json<VerifyLoginRequest>,
    ) -> Result<Json<LoginResponse>, AuthError> {
        let account = self.user_store.find_by_id(&body.user_id).await?;

        if !self
            .otp_service
            .verify(account.otp.as_deref(), account.otp_expires_at, &body.otp)
        {
            return Err(AuthError::invalid_otp());
        }

        self.user_store.consume_otp(&account.id, true).await?;

        let user_id = uuid::Uuid::parse_str(&account.id)
            .map_err(|e| AuthError::internal_error(format!("Invalid user_id format: {}", e)))?;
        let token = self.token_service.generate_jwt(&user_id)?;

        Ok(Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            token,
            user: UserProfile::from_model(&account),
        }))
    }

    /// Start a password reset by emailing a code to the account
    #[oai(path = "/forgot-password", method = "post", tag = "AuthTags::Authentication")]
    async fn forgot_password(
        &self,
        body: Json<ForgotPasswordRequest>,
    ) -> Result<Json<ForgotPasswordResponse>, AuthError> {
        let account = self.user_store.find_by_email(&body.email).await?;
        self.issue_otp(&account.id, "password_reset").await?;

        Ok(Json(ForgotPasswordResponse {
            success: true,
            message: "OTP sent to your email".to_string(),
            user_id: account.id,
        }))
    }

    /// Complete a password reset with the emailed code
    #[oai(path = "/reset-password", method = "post", tag = "AuthTags::Authentication")]
    async fn reset_password(
        &self,
        body: Json<ResetPasswordRequest>,
    ) -> Result<Json<AckResponse>, AuthError> {
        let account = self.user_store.find_by_id(&body.user_id).await?;

        if !self
            .otp_service
            .verify(account.otp.as_deref(), account.otp_expires_at, &body.otp)
        {
            return Err(AuthError::invalid_otp());
        }

        self.user_store.consume_otp(&account.id, false).await?;
        self.user_store
            .reset_password(&account.id, &body.new_password)
            .await?;

        Ok(Json(AckResponse {
            success: true,
            message: "Password reset successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_api() -> (AuthApi, Arc<UserStore>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db));
        let otp_service = Arc::new(OtpService::new(None));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));

        let api = AuthApi::new(user_store.clone(), otp_service, token_service);
        (api, user_store)
    }

    fn register_body() -> Json<RegisterRequest> {
        Json(RegisterRequest {
            first_name: "Arif".to_string(),
            last_name: "Hossain".to_string(),
            email: "2052012345@student.bup.edu.bd".to_string(),
            phone: "01712345678".to_string(),
            department: "CSE".to_string(),
            password: "correct horse battery".to_string(),
            id_card_image: None,
        })
    }

    /// Pull the issued OTP straight out of the store, standing in for the
    /// email the user would receive
    async fn issued_otp(user_store: &UserStore, user_id: &str) -> String {
        user_store
            .find_by_id(user_id)
            .await
            .expect("lookup")
            .otp
            .expect("an OTP should be stored")
    }

    #[tokio::test]
    async fn test_register_issues_otp_and_leaves_account_unverified() {
        let (api, user_store) = setup_test_api().await;

        let response = api.register(register_body()).await.expect("register");
        assert!(response.success);

        let account = user_store
            .find_by_id(&response.user_id)
            .await
            .expect("lookup");
        assert!(!account.is_verified);
        assert!(account.otp.is_some());
    }

    #[tokio::test]
    async fn test_verify_otp_activates_account() {
        let (api, user_store) = setup_test_api().await;
        let registered = api.register(register_body()).await.expect("register");
        let otp = issued_otp(&user_store, &registered.user_id).await;

        let wrong = api
            .verify_otp(Json(VerifyOtpRequest {
                user_id: registered.user_id.clone(),
                otp: "000000".to_string(),
            }))
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidOtp(_))));

        api.verify_otp(Json(VerifyOtpRequest {
            user_id: registered.user_id.clone(),
            otp,
        }))
        .await
        .expect("verify");

        let account = user_store
            .find_by_id(&registered.user_id)
            .await
            .expect("lookup");
        assert!(account.is_verified);
        assert!(account.otp.is_none());
    }

    #[tokio::test]
    async fn test_login_requires_verified_account() {
        let (api, _user_store) = setup_test_api().await;
        api.register(register_body()).await.expect("register");

        let result = api
            .login(Json(LoginRequest {
                email: "2052012345@student.bup.edu.bd".to_string(),
                password: "correct horse battery".to_string(),
            }))
            .await;

        assert!(matches!(result, Err(AuthError::NotVerified(_))));
    }

    #[tokio::test]
    async fn test_login_with_unknown_email_reports_invalid_credentials() {
        let (api, _user_store) = setup_test_api().await;

        let result = api
            .login(Json(LoginRequest {
                email: "nobody@bup.edu.bd".to_string(),
                password: "whatever".to_string(),
            }))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_full_login_flow_returns_valid_token() {
        let (api, user_store) = setup_test_api().await;
        let registered = api.register(register_body()).await.expect("register");
        let otp = issued_otp(&user_store, &registered.user_id).await;
        api.verify_otp(Json(VerifyOtpRequest {
            user_id: registered.user_id.clone(),
            otp,
        }))
        .await
        .expect("verify registration");

        let started = api
            .login(Json(LoginRequest {
                email: "2052012345@student.bup.edu.bd".to_string(),
                password: "correct horse battery".to_string(),
            }))
            .await
            .expect("login start");

        let login_otp = issued_otp(&user_store, &started.user_id).await;
        let completed = api
            .verify_login(Json(VerifyLoginRequest {
                user_id: started.user_id.clone(),
                otp: login_otp,
            }))
            .await
            .expect("login complete");

        assert!(!completed.token.is_empty());
        assert_eq!(completed.user.id, started.user_id);

        let token_service = TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        );
        let claims = token_service
            .validate_jwt(&completed.token)
            .expect("token should validate");
        assert_eq!(claims.sub, started.user_id);
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let (api, user_store) = setup_test_api().await;
        let registered = api.register(register_body()).await.expect("register");
        let otp = issued_otp(&user_store, &registered.user_id).await;
        api.verify_otp(Json(VerifyOtpRequest {
            user_id: registered.user_id.clone(),
            otp,
        }))
        .await
        .expect("verify registration");

        let started = api
            .forgot_password(Json(ForgotPasswordRequest {
                email: "2052012345@student.bup.edu.bd".to_string(),
            }))
            .await
            .expect("forgot password");

        let reset_otp = issued_otp(&user_store, &started.user_id).await;
        api.reset_password(Json(ResetPasswordRequest {
            user_id: started.user_id.clone(),
            otp: reset_otp,
            new_password: "a brand new password".to_string(),
        }))
        .await
        .expect("reset password");

        assert!(user_store
            .verify_credentials("2052012345@student.bup.edu.bd", "a brand new password")
            .await
            .is_ok());
        assert!(user_store
            .verify_credentials("2052012345@student.bup.edu.bd", "correct horse battery")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_resend_otp_replaces_stored_code() {
        let (api, user_store) = setup_test_api().await;
        let registered = api.register(register_body()).await.expect("register");
        let first = issued_otp(&user_store, &registered.user_id).await;

        // Re-issue until the code changes; six-digit collisions are possible
        // but not five times in a row
        let mut replaced = false;
        for _ in 0..5 {
            api.resend_otp(Json(ResendOtpRequest {
                user_id: registered.user_id.clone(),
            }))
            .await
            .expect("resend");
            if issued_otp(&user_store, &registered.user_id).await != first {
                replaced = true;
                break;
            }
        }
        assert!(replaced);
    }
}
