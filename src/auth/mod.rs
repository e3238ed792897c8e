pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::Role;
use crate::error::ApiError;

/// Token claims embedded in every bearer credential. Reconstructed from the
/// signed token on each request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens.
///
/// Owns the signing key and TTL for its whole lifetime: the secret is read
/// from configuration exactly once at construction, so verification never
/// consults ambient state. Tokens are valid for their full TTL; there is no
/// revocation list.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Produce a signed token for the given subject and role
    pub fn issue(&self, subject: Uuid, role: Role) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Token generation failed: {}", e);
            ApiError::internal_server_error("Failed to issue token")
        })
    }

    /// Validate a token and extract its claims. Malformed tokens, bad
    /// signatures and expired tokens all surface the same way.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-12345", 3600)
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let tokens = service();
        let subject = Uuid::new_v4();

        let token = tokens.issue(subject, Role::StoreOwner).unwrap();
        assert!(!token.is_empty());

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, subject);
        assert_eq!(claims.role, Role::StoreOwner);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn garbage_token_rejected() {
        let tokens = service();
        assert!(tokens.verify("not.a.token").is_err());
        assert!(tokens.verify("").is_err());
    }

    #[test]
    fn different_secrets_reject() {
        let a = TokenService::new("secret-a", 3600);
        let b = TokenService::new("secret-b", 3600);

        let token = a.issue(Uuid::new_v4(), Role::User).unwrap();
        assert!(b.verify(&token).is_err());
    }

    #[test]
    fn expired_token_rejected_despite_valid_signature() {
        // TTL far enough in the past to clear default validation leeway
        let tokens = TokenService::new("test-secret-key-12345", -7200);

        let token = tokens.issue(Uuid::new_v4(), Role::Admin).unwrap();
        let err = tokens.verify(&token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
