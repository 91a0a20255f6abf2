//! Authentication context utilities.
//!
//! Extracts the bearer-token role claim issued by the external identity
//! provider. Mutating routes gate on the role; the services below the
//! route layer trust that the gate already passed.

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::Role;
use crate::services::{Claims, JwtService};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Authentication context extracted from the Authorization header.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub claims: Claims,
}

impl AuthContext {
    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Reject with 403 unless the caller holds one of the allowed roles.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.claims.role) {
            Ok(())
        } else {
            tracing::warn!(
                "Role {:?} not permitted for this operation (subject: {})",
                self.claims.role,
                self.claims.sub
            );
            Err(ApiError::forbidden("Insufficient role for this operation"))
        }
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_bearer_token)
            .ok_or_else(|| {
                tracing::warn!("No authorization token provided");
                ApiError::unauthorized("Missing bearer token")
            })?;

        let claims = state.jwt.validate_token(token).map_err(|e| {
            tracing::warn!("JWT validation failed: {}", e);
            ApiError::unauthorized("Invalid bearer token")
        })?;

        Ok(AuthContext { claims })
    }
}
