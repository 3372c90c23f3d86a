//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `POST /login_web` form body. Absent fields count as empty.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /register_web` form body.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub rol: Option<String>,
}

/// `GET /` answer for a logged-in session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatus {
    pub user_id: i32,
    pub rol: String,
}
