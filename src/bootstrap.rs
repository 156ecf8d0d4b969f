use tracing::info;

use crate::auth::password;
use crate::auth::repo_types::User;
use crate::auth::role::Role;
use crate::state::AppState;

const DEFAULT_ADMIN_NAME: &str = "System Admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@healthcare.dev";
const DEFAULT_ADMIN_PASSWORD: &str = "Admin@1234";

/// Create the default admin account if no admin exists yet. Idempotent: a
/// concurrent seed losing the unique-email race is treated as already done.
pub async fn seed_default_admin(state: &AppState) -> anyhow::Result<()> {
    if User::role_exists(&state.db, Role::Admin).await? {
        return Ok(());
    }

    let hash = password::hash_password(DEFAULT_ADMIN_PASSWORD)?;
    match User::create(
        &state.db,
        DEFAULT_ADMIN_NAME,
        DEFAULT_ADMIN_EMAIL,
        &hash,
        Role::Admin,
    )
    .await
    {
        Ok(user) => {
            info!(user_id = user.id, email = DEFAULT_ADMIN_EMAIL, "default admin seeded");
            Ok(())
        }
        Err(e) => {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return Ok(());
                }
            }
            Err(e.into())
        }
    }
}
