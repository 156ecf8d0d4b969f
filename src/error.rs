use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Every way a request can fail, each with its own HTTP mapping.
///
/// Missing and expired tokens answer 401 (re-authenticate and retry), while a
/// malformed or tampered token answers 422 (do not retry the same way).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),
    #[error("Email already registered")]
    DuplicateEmail,
    /// One outcome for both unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authorization token required")]
    MissingToken,
    #[error("Token has expired, please login again")]
    ExpiredToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Access forbidden: insufficient role")]
    Forbidden,
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidToken => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::MissingToken | ApiError::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let (message, errors) = match self {
            ApiError::Validation(errors) => ("Validation failed".to_string(), Some(errors)),
            // Storage and other internal failures are logged above but never
            // returned verbatim to the client.
            ApiError::Database(_) | ApiError::Internal(_) => {
                ("Internal server error".to_string(), None)
            }
            other => (other.to_string(), None),
        };
        (status, Json(ErrorBody { message, errors })).into_response()
    }
}
