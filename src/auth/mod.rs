use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Lifetime of an issued bearer token.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity of the user the token was issued to
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, issued_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token signature invalid or token expired")]
    InvalidToken,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("password hashing error: {0}")]
    Hashing(String),
}

/// Password hashing and bearer token issuance/verification.
///
/// Constructed once at startup from [`SecurityConfig`] and shared by all
/// requests; it holds no mutable state.
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    bcrypt_cost: u32,
}

impl CredentialService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            bcrypt_cost: security.bcrypt_cost,
        }
    }

    /// One-way salted digest of `plaintext`.
    pub async fn hash_password(&self, plaintext: &str) -> Result<String, CredentialError> {
        let plaintext = plaintext.to_owned();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))?
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    pub async fn verify_password(&self, plaintext: &str, digest: &str) -> Result<bool, CredentialError> {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))?
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    pub fn issue_token(&self, user_id: Uuid) -> Result<String, CredentialError> {
        self.issue_token_at(user_id, Utc::now())
    }

    pub fn issue_token_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, CredentialError> {
        let claims = Claims::new(user_id, issued_at);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::TokenGeneration(e.to_string()))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Check the signature, then reject the token once `now >= exp`.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, CredentialError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is enforced below against the caller's clock, with no leeway
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            CredentialError::InvalidToken
        })?;

        if now.timestamp() >= data.claims.exp {
            tracing::debug!("Token rejected: expired at {}", data.claims.exp);
            return Err(CredentialError::InvalidToken);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> CredentialService {
        CredentialService::new(&SecurityConfig {
            jwt_secret: secret.to_string(),
            bcrypt_cost: crate::config::MIN_BCRYPT_COST,
            enable_cors: false,
        })
    }

    #[tokio::test]
    async fn hashes_are_salted_and_verifiable() {
        let svc = service("secret");
        let first = svc.hash_password("password123").await.unwrap();
        let second = svc.hash_password("password123").await.unwrap();

        assert_ne!(first, "password123");
        assert_ne!(first, second);
        assert!(svc.verify_password("password123", &first).await.unwrap());
        assert!(!svc.verify_password("wrongpassword", &first).await.unwrap());
    }

    #[test]
    fn token_carries_subject_and_one_day_expiry() {
        let svc = service("secret");
        let user_id = Uuid::new_v4();
        let token = svc.issue_token(user_id).unwrap();

        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn token_accepted_at_23h_and_rejected_at_25h() {
        let svc = service("secret");
        let issued_at = Utc::now();
        let token = svc.issue_token_at(Uuid::new_v4(), issued_at).unwrap();

        assert!(svc.verify_token_at(&token, issued_at + Duration::hours(23)).is_ok());
        assert!(matches!(
            svc.verify_token_at(&token, issued_at + Duration::hours(25)),
            Err(CredentialError::InvalidToken)
        ));
    }

    #[test]
    fn token_rejected_exactly_at_expiry() {
        let svc = service("secret");
        let issued_at = Utc::now();
        let token = svc.issue_token_at(Uuid::new_v4(), issued_at).unwrap();

        assert!(svc
            .verify_token_at(&token, issued_at + Duration::hours(TOKEN_TTL_HOURS))
            .is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = service("one").issue_token(Uuid::new_v4()).unwrap();
        assert!(matches!(service("two").verify_token(&token), Err(CredentialError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(service("secret").verify_token("invalid"), Err(CredentialError::InvalidToken)));
    }
}
