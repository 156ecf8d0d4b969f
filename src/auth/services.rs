use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{LoginRequest, RegisterRequest};
use super::role::Role;
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Registration input after shape validation and email normalization.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Login input after shape validation and email normalization.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Validate a registration payload, collecting one message per failing field.
pub fn validate_register(payload: RegisterRequest) -> Result<NewUser, ApiError> {
    let mut errors = BTreeMap::new();

    let name = payload.name.trim().to_owned();
    let email = payload.email.trim().to_lowercase();

    let name_len = name.chars().count();
    if !(2..=120).contains(&name_len) {
        errors.insert(
            "name".to_string(),
            "Name must be between 2 and 120 characters".to_string(),
        );
    }
    if !is_valid_email(&email) {
        errors.insert(
            "email".to_string(),
            "Not a valid email address".to_string(),
        );
    }
    if payload.password.chars().count() < 6 {
        errors.insert(
            "password".to_string(),
            "Password must be at least 6 characters".to_string(),
        );
    }
    let role = Role::parse(&payload.role);
    if role.is_none() {
        errors.insert(
            "role".to_string(),
            "Role must be patient, doctor, or admin".to_string(),
        );
    }

    match (errors.is_empty(), role) {
        (true, Some(role)) => Ok(NewUser {
            name,
            email,
            password: payload.password,
            role,
        }),
        _ => Err(ApiError::Validation(errors)),
    }
}

/// Validate a login payload. Only shape is checked here; credential checks
/// happen against the stored record.
pub fn validate_login(payload: LoginRequest) -> Result<LoginInput, ApiError> {
    let mut errors = BTreeMap::new();

    let email = payload.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        errors.insert(
            "email".to_string(),
            "Not a valid email address".to_string(),
        );
    }
    if payload.password.is_empty() {
        errors.insert("password".to_string(), "Password is required".to_string());
    }

    if errors.is_empty() {
        Ok(LoginInput {
            email,
            password: payload.password,
        })
    } else {
        Err(ApiError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_payload() -> RegisterRequest {
        RegisterRequest {
            name: "Carol Davis".into(),
            email: "Carol.Davis@Example.COM ".into(),
            password: "secret-enough".into(),
            role: "doctor".into(),
        }
    }

    #[test]
    fn valid_register_normalizes_email() {
        let input = validate_register(register_payload()).expect("payload is valid");
        assert_eq!(input.email, "carol.davis@example.com");
        assert_eq!(input.name, "Carol Davis");
        assert_eq!(input.role, Role::Doctor);
    }

    #[test]
    fn register_collects_per_field_errors() {
        let payload = RegisterRequest {
            name: "x".into(),
            email: "not-an-email".into(),
            password: "tiny".into(),
            role: "wizard".into(),
        };
        let err = validate_register(payload).expect_err("payload is invalid");
        let ApiError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 4);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
        assert_eq!(errors["role"], "Role must be patient, doctor, or admin");
    }

    #[test]
    fn register_accepts_boundary_lengths() {
        let mut payload = register_payload();
        payload.name = "ab".into();
        payload.password = "123456".into();
        assert!(validate_register(payload).is_ok());
    }

    #[test]
    fn login_requires_well_formed_email_and_password() {
        let err = validate_login(LoginRequest {
            email: "nope".into(),
            password: "".into(),
        })
        .expect_err("payload is invalid");
        let ApiError::Validation(errors) = err else {
            panic!("expected validation failure");
        };
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
    }

    #[test]
    fn login_normalizes_email_case() {
        let input = validate_login(LoginRequest {
            email: "  A@X.COM ".into(),
            password: "whatever".into(),
        })
        .expect("payload is valid");
        assert_eq!(input.email, "a@x.com");
    }
}
