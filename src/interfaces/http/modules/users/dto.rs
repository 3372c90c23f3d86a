//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::User;

/// User API representation. Email and hash never leave the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub rol: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            rol: u.role.as_str().to_string(),
        }
    }
}

/// List users query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Case-insensitive substring of the username
    pub username: Option<String>,
}

/// Role change request. `rol` is `admin` or `user`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 20, message = "rol is required"))]
    pub rol: String,
}
