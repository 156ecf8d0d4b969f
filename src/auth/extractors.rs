use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::claims::Claims;
use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Extracts the bearer token from the Authorization header and verifies it,
/// yielding the decoded claims. Rejection carries the token-failure class:
/// absent header/scheme, expired signature, or malformed/tampered token.
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        // Expect "Bearer <token>"; anything else counts as no token presented
        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(ApiError::MissingToken)?;

        let claims = keys.verify(token).map_err(|e| {
            warn!("token verification failed");
            e
        })?;

        Ok(AuthUser(claims))
    }
}
