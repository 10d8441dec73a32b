//! Session service - Verifies bearer tokens issued by the identity provider.
//!
//! Sign-up and login live outside this service; it only checks the HS256
//! signature and expiry and turns the claims into a [`CurrentUser`].
//! `issue_token` exists for local development and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::CurrentUser;
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        CurrentUser {
            id: claims.sub,
            email: claims.email,
        }
    }
}

/// Minted session token
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Session service trait for dependency injection.
pub trait SessionService: Send + Sync {
    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Sign a token for the given caller
    fn issue_token(&self, user: &CurrentUser) -> AppResult<TokenResponse>;
}

/// HS256 implementation keyed by the configured secret.
#[derive(Clone)]
pub struct JwtSessions {
    config: Config,
}

impl JwtSessions {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl SessionService for JwtSessions {
    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    fn issue_token(&self, user: &CurrentUser) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    const SECRET: &str = "a-very-long-secret-for-testing-only!";

    fn sessions(secret: &str) -> JwtSessions {
        JwtSessions::new(Config::new("sqlite::memory:", secret))
    }

    #[test]
    fn test_issued_token_verifies() {
        let user = CurrentUser::new(Uuid::new_v4(), "ann@x.com");
        let token = sessions(SECRET).issue_token(&user).unwrap();

        let claims = sessions(SECRET).verify_token(&token.access_token).unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(CurrentUser::from(claims), user);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let user = CurrentUser::new(Uuid::new_v4(), "ann@x.com");
        let token = sessions("another-secret-that-is-long-enough!!")
            .issue_token(&user)
            .unwrap();

        let result = sessions(SECRET).verify_token(&token.access_token);

        assert!(matches!(result, Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut config = Config::new("sqlite::memory:", SECRET);
        config.jwt_expiration_hours = -2;
        let user = CurrentUser::new(Uuid::new_v4(), "ann@x.com");
        let token = JwtSessions::new(config).issue_token(&user).unwrap();

        assert!(sessions(SECRET).verify_token(&token.access_token).is_err());
    }
}
