use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use super::dto::PublicUser;
use super::role::Role;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // unique user ID
    pub name: String,               // display name
    pub email: String,              // normalized (lowercased) email
    #[serde(skip_serializing)]
    pub password_hash: String,      // argon2 hash, not exposed in JSON
    pub role: Role,                 // patient, doctor or admin
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime, // creation timestamp
}

impl User {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}
