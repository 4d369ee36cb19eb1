pub mod auth;
pub mod bundle;
pub mod status;
