use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use super::role::Role;
use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// HMAC signing and verification keys, derived once from the process-wide
/// secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::minutes(cfg.ttl_minutes),
        }
    }

    /// Issue a signed token embedding the user's id, role and name.
    pub fn sign(&self, subject: i64, role: Role, name: &str) -> anyhow::Result<String> {
        self.sign_with_ttl(subject, role, name, self.ttl)
    }

    fn sign_with_ttl(
        &self,
        subject: i64,
        role: Role,
        name: &str,
        ttl: Duration,
    ) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: subject,
            name: name.to_owned(),
            role,
            iat: now.unix_timestamp(),
            exp: (now + ttl).unix_timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(subject, role = %role, "jwt signed");
        Ok(token)
    }

    /// Decode and check a token. Expiry of a well-signed token and a bad
    /// signature/format are distinct outcomes; only the former invites
    /// re-authentication.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::ExpiredToken,
                _ => ApiError::InvalidToken,
            },
        )?;
        debug!(subject = data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: "dev-secret".into(),
            ttl_minutes: 8 * 60,
        })
    }

    #[test]
    fn sign_and_verify_keeps_claims() {
        let keys = make_keys();
        let token = keys.sign(42, Role::Doctor, "Dr. Strange").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Doctor);
        assert_eq!(claims.name, "Dr. Strange");
        assert_eq!(claims.exp - claims.iat, 8 * 60 * 60);
    }

    #[test]
    fn expired_token_is_classified_as_expired() {
        let keys = make_keys();
        // Past the default validation leeway
        let token = keys
            .sign_with_ttl(7, Role::Patient, "Old Token", Duration::minutes(-5))
            .expect("sign");
        let err = keys.verify(&token).expect_err("must not verify");
        assert!(matches!(err, ApiError::ExpiredToken));
    }

    #[test]
    fn tampered_token_is_invalid_not_expired() {
        let keys = make_keys();
        let token = keys.sign(7, Role::Patient, "Patient Zero").expect("sign");
        let mut tampered = token.clone();
        let last = tampered.pop().expect("token is not empty");
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        let err = keys.verify(&tampered).expect_err("must not verify");
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let keys = make_keys();
        let err = keys.verify("not.a.jwt").expect_err("must not verify");
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let keys = make_keys();
        let other = JwtKeys::new(&JwtConfig {
            secret: "another-secret".into(),
            ttl_minutes: 8 * 60,
        });
        let token = keys.sign(1, Role::Admin, "Root").expect("sign");
        let err = other.verify(&token).expect_err("must not verify");
        assert!(matches!(err, ApiError::InvalidToken));
    }
}
