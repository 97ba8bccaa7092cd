//! Bootstrap account seeding

use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::domain::{CreateUserDto, DomainResult, Role, UserRepositoryInterface};

/// Create the configured administrator if no users exist.
///
/// Returns `true` when an account was inserted.
pub async fn seed_default_admin(
    users: &dyn UserRepositoryInterface,
    admin: &AdminConfig,
) -> DomainResult<bool> {
    if users.count_users().await? > 0 {
        return Ok(false);
    }

    info!("Creating default admin user...");
    let user = users
        .create_user(CreateUserDto {
            name: admin.name.clone(),
            username: admin.username.clone(),
            password: admin.password.clone(),
            role: Role::Administrator,
        })
        .await?;

    info!("Default admin created: {}", user.username);
    warn!("The default admin password is stored in plaintext; change it before exposing the service");
    Ok(true)
}
