use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use campusfind_backend::services::TokenService;
use campusfind_backend::stores::user_store::NewUser;
use campusfind_backend::stores::{ItemStore, MessageStore, NotificationStore, UserStore};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// Everything an integration scenario needs, wired against one in-memory
/// database the way main.rs wires the real thing
pub struct TestApp {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub item_store: Arc<ItemStore>,
    pub message_store: Arc<MessageStore>,
    pub notification_store: Arc<NotificationStore>,
    pub token_service: Arc<TokenService>,
}

pub async fn setup_test_app() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    TestApp {
        user_store: Arc::new(UserStore::new(db.clone())),
        item_store: Arc::new(ItemStore::new(db.clone())),
        message_store: Arc::new(MessageStore::new(db.clone())),
        notification_store: Arc::new(NotificationStore::new(db.clone())),
        token_service: Arc::new(TokenService::new(TEST_JWT_SECRET.to_string())),
        db,
    }
}

impl TestApp {
    /// Register a verified account and hand back its id
    pub async fn register_user(&self, student_number: &str) -> String {
        let account = self
            .user_store
            .register(NewUser {
                first_name: "Student".to_string(),
                last_name: student_number.to_string(),
                email: format!("{}@student.bup.edu.bd", student_number),
                phone: "01712345678".to_string(),
                department: "CSE".to_string(),
                password: "correct horse battery".to_string(),
                id_card_image: None,
            })
            .await
            .expect("Failed to register test user");
        self.user_store
            .consume_otp(&account.id, true)
            .await
            .expect("Failed to verify test user");
        account.id
    }
}
