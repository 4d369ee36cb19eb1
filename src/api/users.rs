use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::auth::AuthError;
use crate::services::TokenService;
use crate::stores::user_store::ProfileUpdate;
use crate::stores::UserStore;
use crate::types::dto::common::AckResponse;
use crate::types::dto::user::{
    ChangePasswordRequest, UpdateProfileRequest, UserProfile, UserResponse,
};

/// Account profile endpoints for the logged-in user
pub struct UsersApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl UsersApi {
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    fn current_user(&self, auth: &BearerAuth) -> Result<String, AuthError> {
        let claims = self.token_service.validate_jwt(&auth.0.token)?;
        Ok(claims.sub)
    }
}

/// API tags for user endpoints
#[derive(Tags)]
enum UserTags {
    /// User profile endpoints
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// The caller's own profile
    #[oai(path = "/me", method = "get", tag = "UserTags::Users")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<UserResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;
        let account = self.user_store.find_by_id(&user_id).await?;

        Ok(Json(UserResponse {
            success: true,
            user: UserProfile::from_model(&account),
        }))
    }

    /// Edit the caller's profile; requires the current password
    #[oai(path = "/me", method = "put", tag = "UserTags::Users")]
    async fn update_me(
        &self,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<UserResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;
        let body = body.0;

        let updated = self
            .user_store
            .update_profile(
                &user_id,
                &body.current_password,
                ProfileUpdate {
                    first_name: body.first_name,
                    last_name: body.last_name,
                    phone: body.phone,
                    department: body.department,
                    profile_image: body.profile_image,
                },
            )
            .await?;

        Ok(Json(UserResponse {
            success: true,
            user: UserProfile::from_model(&updated),
        }))
    }

    /// Change the caller's password
    #[oai(path = "/me/password", method = "put", tag = "UserTags::Users")]
    async fn change_password(
        &self,
        auth: BearerAuth,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<AckResponse>, AuthError> {
        let user_id = self.current_user(&auth)?;
        self.user_store
            .change_password(&user_id, &body.current_password, &body.new_password)
            .await?;

        Ok(Json(AckResponse {
            success: true,
            message: "Password changed successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::user_store::NewUser;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    async fn setup_test_api() -> (UsersApi, Arc<UserStore>, Arc<TokenService>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));
        let api = UsersApi::new(user_store.clone(), token_service.clone());
        (api, user_store, token_service)
    }

    async fn register_and_login(
        user_store: &UserStore,
        token_service: &TokenService,
    ) -> (String, BearerAuth) {
        let account = user_store
            .register(NewUser {
                first_name: "Arif".to_string(),
                last_name: "Hossain".to_string(),
                email: "2052012345@student.bup.edu.bd".to_string(),
                phone: "01712345678".to_string(),
                department: "CSE".to_string(),
                password: "correct horse battery".to_string(),
                id_card_image: None,
            })
            .await
            .expect("register");

        let user_id = uuid::Uuid::parse_str(&account.id).expect("uuid");
        let token = token_service.generate_jwt(&user_id).expect("token");
        (account.id, BearerAuth(Bearer { token }))
    }

    #[tokio::test]
    async fn test_me_returns_own_profile() {
        let (api, user_store, token_service) = setup_test_api().await;
        let (user_id, auth) = register_and_login(&user_store, &token_service).await;

        let response = api.me(auth).await.expect("me");

        assert!(response.success);
        assert_eq!(response.user.id, user_id);
        assert_eq!(response.user.email, "2052012345@student.bup.edu.bd");
    }

    #[tokio::test]
    async fn test_me_rejects_garbage_token() {
        let (api, _user_store, _token_service) = setup_test_api().await;

        let auth = BearerAuth(Bearer {
            token: "not-a-jwt".to_string(),
        });
        let result = api.me(auth).await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_update_me_requires_current_password() {
        let (api, user_store, token_service) = setup_test_api().await;
        let (_user_id, auth) = register_and_login(&user_store, &token_service).await;

        let result = api
            .update_me(
                auth,
                Json(UpdateProfileRequest {
                    first_name: None,
                    last_name: None,
                    phone: None,
                    department: Some("EEE".to_string()),
                    profile_image: None,
                    current_password: "wrong".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_change_password_round_trip() {
        let (api, user_store, token_service) = setup_test_api().await;
        let (_user_id, auth) = register_and_login(&user_store, &token_service).await;

        api.change_password(
            auth,
            Json(ChangePasswordRequest {
                current_password: "correct horse battery".to_string(),
                new_password: "a brand new password".to_string(),
            }),
        )
        .await
        .expect("change password");

        assert!(user_store
            .verify_credentials("2052012345@student.bup.edu.bd", "a brand new password")
            .await
            .is_ok());
    }
}
