mod api;
mod config;
mod errors;
mod services;
mod stores;
mod types;

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use api::{
    AuthApi, CommentsApi, HealthApi, ItemsApi, MessagesApi, NotificationsApi, StatsApi,
    SuggestionsApi, UsersApi,
};
use config::{logging::init_logging, AppConfig};
use services::{OtpService, TokenService};
use stores::{CommentStore, ItemStore, MessageStore, NotificationStore, SuggestionStore, UserStore};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(%e, "configuration error");
            std::process::exit(1);
        }
    };

    let db: DatabaseConnection = Database::connect(&config.database_url)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(%e, url = %config.database_url, "failed to connect to database");
            std::process::exit(1);
        });
    tracing::info!(url = %config.database_url, "connected to database");

    Migrator::up(&db, None).await.unwrap_or_else(|e| {
        tracing::error!(%e, "failed to run migrations");
        std::process::exit(1);
    });
    tracing::info!("database migrations completed");

    if config.master_otp.is_some() {
        tracing::warn!("master OTP bypass is enabled; do not use in production");
    }

    let user_store = Arc::new(UserStore::new(db.clone()));
    let item_store = Arc::new(ItemStore::new(db.clone()));
    let message_store = Arc::new(MessageStore::new(db.clone()));
    let notification_store = Arc::new(NotificationStore::new(db.clone()));
    let comment_store = Arc::new(CommentStore::new(db.clone()));
    let suggestion_store = Arc::new(SuggestionStore::new(db.clone()));

    let token_service = Arc::new(TokenService::new(config.jwt_secret.clone()));
    let otp_service = Arc::new(OtpService::new(config.master_otp.clone()));

    let apis = (
        HealthApi,
        AuthApi::new(user_store.clone(), otp_service, token_service.clone()),
        UsersApi::new(user_store.clone(), token_service.clone()),
        ItemsApi::new(item_store.clone(), token_service.clone()),
        CommentsApi::new(comment_store, user_store.clone(), token_service.clone()),
        SuggestionsApi::new(suggestion_store, user_store.clone(), token_service.clone()),
        MessagesApi::new(message_store, user_store.clone(), token_service.clone()),
        NotificationsApi::new(notification_store, token_service.clone()),
        StatsApi::new(item_store, user_store, token_service),
    );

    let api_service = OpenApiService::new(apis, "CampusFind API", env!("CARGO_PKG_VERSION"))
        .server(format!("http://{}/api", config.bind_address));
    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!(address = %config.bind_address, "starting server");
    Server::new(TcpListener::bind(config.bind_address)).run(app).await
}
