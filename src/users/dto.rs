use serde::Serialize;

use crate::auth::dto::PublicUser;
use crate::auth::role::Role;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
}

/// Role-specific dashboard payload. `data` is opaque to the auth core.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub role: Role,
    pub data: serde_json::Value,
}
