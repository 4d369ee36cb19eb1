// Config layer - environment-driven application settings
pub mod logging;

use std::env;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),
}

/// Application configuration, loaded once at startup.
///
/// The master OTP bypass is deliberately carried here as an injected
/// capability rather than read from the environment at use sites.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub jwt_secret: String,

    /// When set, this code is accepted in place of any issued OTP.
    /// Intended for development and staging only.
    pub master_otp: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://campusfind.db?mode=rwc".to_string());

        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVariable("JWT_SECRET"))?;

        let master_otp = env::var("MASTER_OTP").ok().filter(|v| !v.is_empty());

        Ok(Self {
            database_url,
            bind_address,
            jwt_secret,
            master_otp,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("bind_address", &self.bind_address)
            .field("jwt_secret", &"<redacted>")
            .field("master_otp", &self.master_otp.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_does_not_expose_secrets() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            jwt_secret: "very-secret-jwt-key".to_string(),
            master_otp: Some("999999".to_string()),
        };

        let output = format!("{:?}", config);
        assert!(output.contains("<redacted>"));
        assert!(!output.contains("very-secret-jwt-key"));
        assert!(!output.contains("999999"));
    }
}
