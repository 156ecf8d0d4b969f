use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use tracing::instrument;

use super::dto::{DashboardResponse, ProfileResponse};
use crate::auth::dto::PublicUser;
use crate::auth::extractors::AuthUser;
use crate::auth::guard::authorize;
use crate::auth::repo_types::User;
use crate::auth::role::Role;
use crate::error::ApiError;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/patient/dashboard", get(patient_dashboard))
        .route("/doctor/dashboard", get(doctor_dashboard))
        .route("/admin/dashboard", get(admin_dashboard))
}

/// Any authenticated role may read its own profile.
#[instrument(skip(state, claims))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    authorize(&claims, &Role::ALL)?;

    // The record may have been removed out-of-band since the token was issued
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(ProfileResponse {
        user: user.to_public(),
    }))
}

#[instrument(skip(claims))]
pub async fn patient_dashboard(
    AuthUser(claims): AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    authorize(&claims, &[Role::Patient])?;

    Ok(Json(DashboardResponse {
        message: format!("Welcome to your Patient Dashboard, {}!", claims.name),
        role: Role::Patient,
        data: json!({
            "appointments": [
                {"id": 1, "doctor": "Dr. Smith", "date": "2026-03-10", "status": "Confirmed"},
                {"id": 2, "doctor": "Dr. Lee", "date": "2026-03-22", "status": "Pending"},
            ],
            "prescriptions": 3,
            "health_score": 87,
        }),
    }))
}

#[instrument(skip(claims))]
pub async fn doctor_dashboard(
    AuthUser(claims): AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    authorize(&claims, &[Role::Doctor])?;

    Ok(Json(DashboardResponse {
        message: format!("Welcome, {}! Here is your Doctor Dashboard.", claims.name),
        role: Role::Doctor,
        data: json!({
            "today_patients": 8,
            "pending_reviews": 4,
            "schedule": [
                {"time": "09:00", "patient": "Alice Brown", "type": "Check-up"},
                {"time": "11:30", "patient": "Bob Carter", "type": "Follow-up"},
                {"time": "14:00", "patient": "Carol Davis", "type": "Consultation"},
            ],
        }),
    }))
}

/// Admin dashboard with live per-role counts and the five newest accounts.
#[instrument(skip(state, claims))]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    authorize(&claims, &[Role::Admin])?;

    let total_users = User::count_all(&state.db).await?;
    let patients = User::count_by_role(&state.db, Role::Patient).await?;
    let doctors = User::count_by_role(&state.db, Role::Doctor).await?;
    let admins = User::count_by_role(&state.db, Role::Admin).await?;
    let recent_users: Vec<PublicUser> = User::recent(&state.db, 5)
        .await?
        .iter()
        .map(User::to_public)
        .collect();

    Ok(Json(DashboardResponse {
        message: "Admin Control Panel".to_string(),
        role: Role::Admin,
        data: json!({
            "stats": {
                "total_users": total_users,
                "patients": patients,
                "doctors": doctors,
                "admins": admins,
            },
            "recent_users": recent_users,
        }),
    }))
}
