//! JWT validation for bearer tokens from the external identity provider.
//!
//! The tracker does not run its own login flow: an external provider issues
//! HS256 bearer tokens carrying a role claim, and this service validates
//! them with the shared secret. Token issuance exists for tests and
//! operational tooling only.

use crate::models::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (operator identity)
    pub sub: String,
    /// Role claim gating mutating operations
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// JWT validation service configuration
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service with the given shared secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create a JWT service from the JWT_SECRET environment variable,
    /// falling back to an insecure default for development.
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) => s,
            Err(_) => {
                warn!("JWT_SECRET not set! Using default secret. DO NOT USE IN PRODUCTION!");
                "dev-secret-do-not-use-in-production-change-me-now".to_string()
            }
        };
        Self::new(&secret)
    }

    /// Strip the "Bearer " prefix from an Authorization header value.
    pub fn extract_bearer_token(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim)
    }

    /// Validate a bearer token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, String> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| format!("Invalid token: {}", e))
    }

    /// Issue a token with the given subject and role. Used by tests and
    /// operational tooling; production tokens come from the identity
    /// provider.
    pub fn issue_token(&self, sub: &str, role: Role, ttl: Duration) -> Result<String, String> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            role,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| format!("Failed to encode token: {}", e))
    }
}
