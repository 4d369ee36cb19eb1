// Errors layer - Error type definitions
pub mod auth;
pub mod items;

// Re-exports for convenience
pub use auth::AuthError;
pub use items::ItemError;
