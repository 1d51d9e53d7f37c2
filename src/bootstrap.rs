use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::repositories::UserRepository;

/// Creates the staff account used to reach the admin endpoints, once.
pub async fn initialize_admin_user(
    db: &DatabaseConnection,
    admin_username: &str,
    admin_password: &str,
) -> Result<()> {
    let user_repo = UserRepository::with_connection(db);

    let existing_admin = user_repo
        .find_by_username(admin_username)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password = bcrypt::hash(admin_password, bcrypt::DEFAULT_COST)
        .context("Failed to hash admin password")?;

    UserRepository::create(
        db,
        admin_username,
        hashed_password,
        "School",
        "Administrator",
        true,
    )
    .await
    .context("Failed to insert admin user")?;

    tracing::info!("Admin user created: {}", admin_username);
    tracing::warn!("Please change the default admin password after first login");

    Ok(())
}
