//! Page handlers
//!
//! Views are thin: they inject who is looking and, for client pages, which
//! client. The data itself is fetched by the page from the JSON API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Extension;
use serde::Serialize;
use serde_json::json;

use super::templates::{PageResult, Templates};
use crate::domain::UserRole;
use crate::interfaces::http::middleware::CurrentUser;

/// Shown when a stored role is neither admin nor user.
pub const UNKNOWN_ROLE_MESSAGE: &str = "Rol necunoscut";

#[derive(Clone)]
pub struct PageState {
    pub templates: Templates,
}

#[derive(Debug, Serialize)]
struct Viewer<'a> {
    username: &'a str,
    rol: &'a str,
}

impl<'a> From<&'a CurrentUser> for Viewer<'a> {
    fn from(user: &'a CurrentUser) -> Self {
        Self {
            username: &user.username,
            rol: user.role.as_str(),
        }
    }
}

pub async fn dashboard_principal(State(state): State<PageState>) -> PageResult {
    state.templates.render("dashboard_principal", &json!({}))
}

/// Admins and users land on different dashboards.
pub async fn dashboard(
    State(state): State<PageState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult {
    match user.role {
        UserRole::Admin => state.templates.render("dashboard", &Viewer::from(&user)),
        UserRole::User => state.templates.render("dashboard_user", &Viewer::from(&user)),
        UserRole::Unknown(ref role) => {
            tracing::warn!(user_id = user.id, role = %role, "Dashboard denied for unknown role");
            Ok((StatusCode::FORBIDDEN, Html(UNKNOWN_ROLE_MESSAGE)).into_response())
        }
    }
}

pub async fn dashboard_sume(
    State(state): State<PageState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult {
    state.templates.render("sume", &Viewer::from(&user))
}

pub async fn dashboard_top5(
    State(state): State<PageState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult {
    state.templates.render("top5", &Viewer::from(&user))
}

pub async fn dashboard_alerte(
    State(state): State<PageState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult {
    state.templates.render("alerte", &Viewer::from(&user))
}

pub async fn dashboard_clienti(
    State(state): State<PageState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult {
    state.templates.render("clienti", &Viewer::from(&user))
}

pub async fn dashboard_userweb(
    State(state): State<PageState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult {
    state.templates.render("userweb", &Viewer::from(&user))
}

pub async fn select_client(
    State(state): State<PageState>,
    Extension(user): Extension<CurrentUser>,
) -> PageResult {
    state.templates.render("select_client", &Viewer::from(&user))
}

pub async fn client_page(
    State(state): State<PageState>,
    Path(client_id): Path<i32>,
) -> PageResult {
    state
        .templates
        .render("client_detalii", &json!({ "client_id": client_id }))
}

pub async fn client_stats_page(
    State(state): State<PageState>,
    Path(client_id): Path<i32>,
) -> PageResult {
    state
        .templates
        .render("client_statistici", &json!({ "client_id": client_id }))
}

pub async fn client_consumption_page(
    State(state): State<PageState>,
    Path(client_id): Path<i32>,
) -> PageResult {
    state
        .templates
        .render("client_consum", &json!({ "client_id": client_id }))
}
