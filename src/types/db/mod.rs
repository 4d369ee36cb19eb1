// Database entities (sea-orm models)
pub mod comment;
pub mod item;
pub mod item_request;
pub mod message;
pub mod notification;
pub mod suggestion;
pub mod user;
pub mod validity_question;
