// API layer - HTTP endpoints
pub mod auth;
pub mod comments;
pub mod health;
pub mod items;
pub mod messages;
pub mod notifications;
pub mod stats;
pub mod suggestions;
pub mod users;

pub use auth::AuthApi;
pub use comments::CommentsApi;
pub use health::HealthApi;
pub use items::ItemsApi;
pub use messages::MessagesApi;
pub use notifications::NotificationsApi;
pub use stats::StatsApi;
pub use suggestions::SuggestionsApi;
pub use users::UsersApi;

use poem_openapi::{auth::Bearer, SecurityScheme};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);
