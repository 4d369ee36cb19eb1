// Services layer - Business logic
pub mod notifier;
pub mod otp_service;
pub mod token_service;

pub use notifier::{Notifier, MESSAGE_KIND_CHAT, MESSAGE_KIND_CONTACT_SHARE};
pub use otp_service::OtpService;
pub use token_service::TokenService;
