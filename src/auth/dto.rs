use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::role::Role;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client. The stored credential has
/// no representation here at all.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn public_user_serializes_contract_fields() {
        let user = PublicUser {
            id: 3,
            name: "Alice Brown".into(),
            email: "alice@example.com".into(),
            role: Role::Patient,
            created_at: datetime!(2026-03-01 12:30:00 UTC),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Alice Brown");
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["role"], "patient");
        assert_eq!(json["created_at"], "2026-03-01T12:30:00Z");
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn auth_response_shape() {
        let response = AuthResponse {
            message: "Login successful".into(),
            token: "jwt".into(),
            user: PublicUser {
                id: 1,
                name: "Bob Carter".into(),
                email: "bob@example.com".into(),
                role: Role::Doctor,
                created_at: datetime!(2026-01-15 08:00:00 UTC),
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Login successful"));
        assert!(json.contains("bob@example.com"));
        assert!(json.contains("\"token\""));
    }
}
