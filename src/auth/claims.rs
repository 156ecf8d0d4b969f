use serde::{Deserialize, Serialize};

use super::role::Role;

/// JWT payload used for authentication and role checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,     // user ID
    pub name: String, // display name
    pub role: Role,   // role claim checked by the gate
    pub iat: i64,     // issued at (unix timestamp)
    pub exp: i64,     // expires at (unix timestamp)
}
