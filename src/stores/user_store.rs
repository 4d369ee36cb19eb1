use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::auth::AuthError;
use crate::types::db::user::{self, Entity as User};

/// Fields collected at registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub password: String,
    pub id_card_image: Option<String>,
}

/// Profile fields an account holder may edit; `None` leaves a field as-is
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub profile_image: Option<String>,
}

/// UserStore manages account records: registration, credential checks,
/// OTP state, and profile edits.
pub struct UserStore {
    db: DatabaseConnection,
}

/// Student addresses are ten digits at the student subdomain; staff use the
/// bare university domain.
fn is_university_email(email: &str) -> bool {
    if let Some(local) = email.strip_suffix("@student.bup.edu.bd") {
        return local.len() == 10 && local.chars().all(|c| c.is_ascii_digit());
    }
    match email.strip_suffix("@bup.edu.bd") {
        Some(local) => !local.is_empty(),
        None => false,
    }
}

/// Local mobile format: eleven digits starting with 01.
fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.starts_with("01") && phone.chars().all(|c| c.is_ascii_digit())
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new account. The account starts unverified; the caller is
    /// responsible for issuing an OTP afterwards.
    pub async fn register(&self, new_user: NewUser) -> Result<user::Model, AuthError> {
        if !is_university_email(&new_user.email) {
            return Err(AuthError::validation(format!(
                "{} is not a valid university email",
                new_user.email
            )));
        }
        if !is_valid_phone(&new_user.phone) {
            return Err(AuthError::validation(format!(
                "{} is not a valid phone number",
                new_user.phone
            )));
        }

        let existing = User::find()
            .filter(user::Column::Email.eq(&new_user.email))
            .one(&self.db)
            .await
            .map_err(AuthError::internal_error)?;
        if existing.is_some() {
            return Err(AuthError::duplicate_email());
        }

        let password_hash = hash_password(&new_user.password)?;
        let now = Utc::now().timestamp();

        let model = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            phone: Set(new_user.phone),
            department: Set(new_user.department),
            password_hash: Set(password_hash),
            id_card_image: Set(new_user.id_card_image),
            profile_image: Set(None),
            is_verified: Set(false),
            otp: Set(None),
            otp_expires_at: Set(None),
            is_admin: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                AuthError::internal_error(e)
            }
        })?;

        Ok(inserted)
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<user::Model, AuthError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AuthError::internal_error)?
            .ok_or_else(AuthError::user_not_found)
    }

    /// Fetch several accounts at once, keyed by id. Missing ids are simply
    /// absent from the result.
    pub async fn find_many(
        &self,
        user_ids: impl IntoIterator<Item = String>,
    ) -> Result<Vec<user::Model>, AuthError> {
        User::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(AuthError::internal_error)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<user::Model, AuthError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AuthError::internal_error)?
            .ok_or_else(AuthError::user_not_found)
    }

    /// Verify an email/password pair and return the account.
    /// Does not check the OTP-verified flag; callers gate on it separately.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, AuthError> {
        let account = self.find_by_email(email).await?;
        verify_password(password, &account.password_hash)?;
        Ok(account)
    }

    /// Store a freshly issued OTP on the account
    pub async fn set_otp(
        &self,
        user_id: &str,
        otp: &str,
        expires_at: i64,
    ) -> Result<(), AuthError> {
        let account = self.find_by_id(user_id).await?;
        let mut active: user::ActiveModel = account.into();
        active.otp = Set(Some(otp.to_string()));
        active.otp_expires_at = Set(Some(expires_at));
        active.updated_at = Set(Utc::now().timestamp());
        active.update(&self.db).await.map_err(AuthError::internal_error)?;
        Ok(())
    }

    /// Clear OTP state, optionally marking the account verified
    pub async fn consume_otp(&self, user_id: &str, mark_verified: bool) -> Result<(), AuthError> {
        let account = self.find_by_id(user_id).await?;
        let mut active: user::ActiveModel = account.into();
        active.otp = Set(None);
        active.otp_expires_at = Set(None);
        if mark_verified {
            active.is_verified = Set(true);
        }
        active.updated_at = Set(Utc::now().timestamp());
        active.update(&self.db).await.map_err(AuthError::internal_error)?;
        Ok(())
    }

    /// Apply profile edits after the current password has been re-verified
    pub async fn update_profile(
        &self,
        user_id: &str,
        current_password: &str,
        update: ProfileUpdate,
    ) -> Result<user::Model, AuthError> {
        let account = self.find_by_id(user_id).await?;
        verify_password(current_password, &account.password_hash)?;

        if let Some(phone) = &update.phone {
            if !is_valid_phone(phone) {
                return Err(AuthError::validation(format!(
                    "{} is not a valid phone number",
                    phone
                )));
            }
        }

        let mut active: user::ActiveModel = account.into();
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(phone) = update.phone {
            active.phone = Set(phone);
        }
        if let Some(department) = update.department {
            active.department = Set(department);
        }
        if let Some(profile_image) = update.profile_image {
            active.profile_image = Set(Some(profile_image));
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(&self.db).await.map_err(AuthError::internal_error)
    }

    /// Change password after re-verifying the current one
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let account = self.find_by_id(user_id).await?;
        verify_password(current_password, &account.password_hash)?;
        self.store_password(account, new_password).await
    }

    /// Overwrite the password without the current one; callers must have
    /// completed the OTP reset flow first
    pub async fn reset_password(&self, user_id: &str, new_password: &str) -> Result<(), AuthError> {
        let account = self.find_by_id(user_id).await?;
        self.store_password(account, new_password).await
    }

    async fn store_password(&self, account: user::Model, password: &str) -> Result<(), AuthError> {
        let password_hash = hash_password(password)?;
        let mut active: user::ActiveModel = account.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now().timestamp());
        active.update(&self.db).await.map_err(AuthError::internal_error)?;
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(AuthError::internal_error)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::invalid_credentials())?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::invalid_credentials())
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore").field("db", &"<connection>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_store() -> UserStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        UserStore::new(db)
    }

    fn sample_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Arif".to_string(),
            last_name: "Hossain".to_string(),
            email: email.to_string(),
            phone: "01712345678".to_string(),
            department: "CSE".to_string(),
            password: "correct horse battery".to_string(),
            id_card_image: None,
        }
    }

    #[test]
    fn test_student_and_staff_email_formats() {
        assert!(is_university_email("2052012345@student.bup.edu.bd"));
        assert!(is_university_email("someone@bup.edu.bd"));

        assert!(!is_university_email("123@student.bup.edu.bd"));
        assert!(!is_university_email("abcdefghij@student.bup.edu.bd"));
        assert!(!is_university_email("@bup.edu.bd"));
        assert!(!is_university_email("someone@gmail.com"));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("01712345678"));
        assert!(!is_valid_phone("0171234567"));
        assert!(!is_valid_phone("02712345678"));
        assert!(!is_valid_phone("017123456ab"));
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_starts_unverified() {
        let store = setup_test_store().await;

        let account = store
            .register(sample_user("2052012345@student.bup.edu.bd"))
            .await
            .expect("registration should succeed");

        assert!(!account.is_verified);
        assert_ne!(account.password_hash, "correct horse battery");
        assert!(account.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_rejects_non_university_email() {
        let store = setup_test_store().await;

        let result = store.register(sample_user("someone@gmail.com")).await;

        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = setup_test_store().await;
        let email = "2052012345@student.bup.edu.bd";

        store.register(sample_user(email)).await.expect("first registration");
        let result = store.register(sample_user(email)).await;

        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_verify_credentials_round_trip() {
        let store = setup_test_store().await;
        let email = "2052012345@student.bup.edu.bd";
        store.register(sample_user(email)).await.expect("registration");

        let ok = store.verify_credentials(email, "correct horse battery").await;
        assert!(ok.is_ok());

        let bad = store.verify_credentials(email, "wrong password").await;
        assert!(matches!(bad, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_consume_otp_marks_verified() {
        let store = setup_test_store().await;
        let account = store
            .register(sample_user("2052012345@student.bup.edu.bd"))
            .await
            .expect("registration");

        store
            .set_otp(&account.id, "123456", Utc::now().timestamp() + 600)
            .await
            .expect("set otp");
        store.consume_otp(&account.id, true).await.expect("consume otp");

        let refreshed = store.find_by_id(&account.id).await.expect("lookup");
        assert!(refreshed.is_verified);
        assert!(refreshed.otp.is_none());
        assert!(refreshed.otp_expires_at.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_requires_current_password() {
        let store = setup_test_store().await;
        let account = store
            .register(sample_user("2052012345@student.bup.edu.bd"))
            .await
            .expect("registration");

        let update = ProfileUpdate {
            department: Some("EEE".to_string()),
            ..Default::default()
        };
        let denied = store
            .update_profile(&account.id, "wrong password", update.clone())
            .await;
        assert!(matches!(denied, Err(AuthError::InvalidCredentials(_))));

        let updated = store
            .update_profile(&account.id, "correct horse battery", update)
            .await
            .expect("update should succeed");
        assert_eq!(updated.department, "EEE");
        assert_eq!(updated.first_name, "Arif");
    }

    #[tokio::test]
    async fn test_change_password() {
        let store = setup_test_store().await;
        let email = "2052012345@student.bup.edu.bd";
        let account = store.register(sample_user(email)).await.expect("registration");

        store
            .change_password(&account.id, "correct horse battery", "new password 123")
            .await
            .expect("change password");

        assert!(store.verify_credentials(email, "new password 123").await.is_ok());
        assert!(store
            .verify_credentials(email, "correct horse battery")
            .await
            .is_err());
    }
}
