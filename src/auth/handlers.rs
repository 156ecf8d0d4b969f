use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{AuthResponse, LoginRequest, RegisterRequest};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use super::repo_types::User;
use super::services;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let input = services::validate_register(payload)?;

    // Ensure email is not taken
    if User::find_by_email(&state.db, &input.email).await?.is_some() {
        warn!(email = %input.email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    // Argon2 is CPU-bound; keep it off the async workers
    let plain = input.password.clone();
    let hash = tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(anyhow::Error::from)??;

    let user = User::create(&state.db, &input.name, &input.email, &hash, input.role)
        .await
        .map_err(|e| {
            // The pre-check above is racy; the unique constraint is authoritative
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    warn!(email = %input.email, "email already registered (insert race)");
                    return ApiError::DuplicateEmail;
                }
            }
            ApiError::from(e)
        })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role, &user.name)?;

    info!(user_id = user.id, email = %user.email, role = %user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Account created successfully".to_string(),
            token,
            user: user.to_public(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let input = services::validate_login(payload)?;

    // Unknown email and wrong password fail identically
    let Some(user) = User::find_by_email(&state.db, &input.email).await? else {
        warn!(email = %input.email, "login with unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let plain = input.password;
    let stored = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&plain, &stored))
        .await
        .map_err(anyhow::Error::from)?;

    if !ok {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role, &user.name)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.to_public(),
    }))
}
