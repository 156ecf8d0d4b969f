use tracing::warn;

use super::claims::Claims;
use super::role::Role;
use crate::error::ApiError;

/// Role gate composed in front of every protected operation. The caller
/// already holds verified claims, so a missing/expired/invalid token can
/// never reach this check.
pub fn authorize(claims: &Claims, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        warn!(subject = claims.sub, role = %claims.role, "role not permitted");
        Err(ApiError::Forbidden)
    }
}
