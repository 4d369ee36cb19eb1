// Stores layer - Data access and repository pattern
pub mod comment_store;
pub mod item_store;
pub mod message_store;
pub mod notification_store;
pub mod suggestion_store;
pub mod user_store;

pub use comment_store::CommentStore;
pub use item_store::ItemStore;
pub use message_store::MessageStore;
pub use notification_store::NotificationStore;
pub use suggestion_store::SuggestionStore;
pub use user_store::UserStore;
