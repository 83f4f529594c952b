use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::roles::Role;

/// Claims as they travel inside the token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,        // user_id
    pub email: String,
    #[serde(default)]
    pub role_id: Option<i32>,
    pub iat: i64,
    pub exp: i64,        // expiration timestamp
}

/// Verified identity handed to handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthClaims {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

/// Issues and verifies HS256 bearer tokens. Built once at startup from the
/// configured secret and shared read-only.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Signs a token for the account, valid for the configured window.
    pub fn issue(&self, user_id: i32, email: &str, role: Role) -> Result<String, AppError> {
        self.issue_with_ttl(user_id, email, Some(role), self.ttl)
    }

    fn issue_with_ttl(
        &self,
        user_id: i32,
        email: &str,
        role: Option<Role>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal("Failed to calculate expiration".to_string()))?;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role_id: role.map(Role::id),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a presented bearer token.
    ///
    /// * no token → `Unauthenticated`
    /// * bad signature, garbage, or past `exp` → `InvalidToken`
    /// * no usable `role_id` claim → `MalformedClaims`
    pub fn verify(&self, token: Option<&str>) -> Result<AuthClaims, AppError> {
        let token = token.ok_or_else(|| {
            AppError::Unauthenticated("Access denied. No token provided.".to_string())
        })?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                AppError::InvalidToken
            })?;

        let role = claims
            .role_id
            .and_then(|id| Role::try_from(id).ok())
            .ok_or(AppError::MalformedClaims)?;

        Ok(AuthClaims {
            user_id: claims.sub,
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-minimum-32-characters-long", Duration::hours(1))
    }

    #[test]
    fn test_generate_and_verify_token() {
        let tokens = service();
        let token = tokens.issue(123, "ali@example.com", Role::Admin).unwrap();
        let claims = tokens.verify(Some(&token)).unwrap();

        assert_eq!(claims.user_id, 123);
        assert_eq!(claims.email, "ali@example.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_missing_token_is_unauthenticated() {
        let result = service().verify(None);
        assert!(matches!(result, Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn test_invalid_token() {
        let result = service().verify(Some("invalid.token.here"));
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new("another-secret-another-secret-123", Duration::hours(1));
        let token = other.issue(1, "a@b.c", Role::Customer).unwrap();
        assert!(matches!(service().verify(Some(&token)), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_token_is_valid_until_expiry() {
        let tokens = service();
        let token = tokens
            .issue_with_ttl(5, "a@b.c", Some(Role::Customer), Duration::seconds(30))
            .unwrap();
        assert!(tokens.verify(Some(&token)).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service();
        let token = tokens
            .issue_with_ttl(5, "a@b.c", Some(Role::Customer), Duration::seconds(-1))
            .unwrap();
        assert!(matches!(tokens.verify(Some(&token)), Err(AppError::InvalidToken)));

        let long_gone = tokens
            .issue_with_ttl(5, "a@b.c", Some(Role::Customer), Duration::hours(-2))
            .unwrap();
        assert!(matches!(tokens.verify(Some(&long_gone)), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_token_without_role_is_malformed() {
        let tokens = service();
        let token = tokens
            .issue_with_ttl(9, "a@b.c", None, Duration::hours(1))
            .unwrap();
        assert!(matches!(tokens.verify(Some(&token)), Err(AppError::MalformedClaims)));
    }
}
