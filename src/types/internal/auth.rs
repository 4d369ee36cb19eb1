use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload carried inside a signed session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token authenticates
    pub sub: String,

    /// Expiry as a Unix timestamp
    pub exp: i64,

    /// Issue time as a Unix timestamp
    pub iat: i64,
}

impl Claims {
    /// Claims for `user_id`, valid for `ttl` from now
    pub fn issue(user_id: &Uuid, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            exp: now + ttl.num_seconds(),
            iat: now,
        }
    }
}
