use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use uuid::Uuid;

use crate::errors::auth::AuthError;
use crate::types::internal::auth::Claims;

/// Manages JWT token generation and validation
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_days: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_days: 30,
        }
    }

    /// Generate a JWT for the given user_id
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Result<String, AuthError>` - The encoded JWT or an error
    pub fn generate_jwt(&self, user_id: &Uuid) -> Result<String, AuthError> {
        let claims = Claims::issue(user_id, Duration::days(self.jwt_expiration_days));

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to generate JWT: {}", e)))?;

        Ok(token)
    }

    /// Validate a JWT and return the claims
    ///
    /// # Arguments
    /// * `token` - The JWT to validate
    ///
    /// # Returns
    /// * `Result<Claims, AuthError>` - The decoded claims or an error
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                AuthError::expired_token()
            } else {
                AuthError::invalid_token()
            }
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_days", &self.jwt_expiration_days)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn test_service() -> TokenService {
        TokenService::new("test-secret-key-minimum-32-characters-long".to_string())
    }

    #[test]
    fn test_generate_jwt_creates_valid_jwt() {
        let token_service = test_service();
        let user_id = Uuid::new_v4();

        let result = token_service.generate_jwt(&user_id);

        assert!(result.is_ok());
        let token = result.unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test-secret-key-minimum-32-characters-long".as_bytes()),
            &validation,
        );

        assert!(decoded.is_ok());
    }

    #[test]
    fn test_jwt_contains_correct_user_id() {
        let token_service = test_service();
        let user_id = Uuid::new_v4();

        let token = token_service.generate_jwt(&user_id).unwrap();
        let claims = token_service.validate_jwt(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
    }

    #[test]
    fn test_jwt_expiration_is_30_days() {
        let token_service = test_service();
        let user_id = Uuid::new_v4();

        let token = token_service.generate_jwt(&user_id).unwrap();
        let claims = token_service.validate_jwt(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_validate_jwt_fails_with_invalid_signature() {
        let token_service = test_service();
        let wrong_service =
            TokenService::new("wrong-secret-key-minimum-32-characters".to_string());
        let user_id = Uuid::new_v4();

        let token = token_service.generate_jwt(&user_id).unwrap();
        let result = wrong_service.validate_jwt(&token);

        assert!(result.is_err());
        match result {
            Err(AuthError::InvalidToken(_)) => {}
            _ => panic!("Expected InvalidToken error"),
        }
    }

    #[test]
    fn test_validate_jwt_fails_with_expired_jwt() {
        let token_service = test_service();

        let now = Utc::now().timestamp();
        let expired_claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };

        let expired_token = encode(
            &Header::new(Algorithm::HS256),
            &expired_claims,
            &EncodingKey::from_secret("test-secret-key-minimum-32-characters-long".as_bytes()),
        )
        .unwrap();

        let result = token_service.validate_jwt(&expired_token);

        assert!(result.is_err());
        match result {
            Err(AuthError::ExpiredToken(_)) => {}
            _ => panic!("Expected ExpiredToken error"),
        }
    }

    #[test]
    fn test_debug_trait_does_not_expose_jwt_secret() {
        let token_service = TokenService::new("super-secret-jwt-key".to_string());

        let debug_output = format!("{:?}", token_service);

        assert!(!debug_output.contains("super-secret-jwt-key"));
        assert!(debug_output.contains("<redacted>"));
    }
}
