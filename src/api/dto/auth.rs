//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Role, User};

/// `POST /login` form body
///
/// Both fields must be present, but empty strings are looked up like any
/// other credentials.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user. Never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub name: String,
    pub username: String,
    /// `administrador`, `perito` or `supervisor`
    #[schema(value_type = String, example = "perito")]
    pub role: Role,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserInfo,
    /// Seconds until the session expires
    pub expires_in: i64,
}
