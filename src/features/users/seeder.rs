use crate::core::config::SeedConfig;
use crate::core::error::Result;
use crate::features::users::repository::UserRepository;
use crate::features::users::services::hash_password;

/// First-or-create of the admin account by email. Safe to run on every boot.
pub async fn seed_admin(users: &dyn UserRepository, config: &SeedConfig) -> Result<()> {
    let hash = hash_password(config.admin_password.clone()).await?;

    let created = users
        .insert_if_absent(&config.admin_name, &config.admin_email, &hash)
        .await?;

    if created {
        tracing::info!("Seeded admin account '{}'", config.admin_email);
    } else {
        tracing::debug!("Admin account '{}' already present", config.admin_email);
    }

    Ok(())
}
