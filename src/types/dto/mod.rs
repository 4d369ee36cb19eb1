// DTO layer - request/response models for the HTTP surface
pub mod auth;
pub mod common;
pub mod feedback;
pub mod items;
pub mod messaging;
pub mod requests;
pub mod stats;
pub mod user;
