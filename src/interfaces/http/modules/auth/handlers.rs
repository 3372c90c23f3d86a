//! Authentication handlers
//!
//! Form-based login and registration over a cookie session.
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde_json::json;
use tower_sessions::Session;

use super::dto::{LoginForm, RegisterForm, SessionStatus};
use crate::application::{Registration, UserService};
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{public_message, status_for, ApiResponse};
use crate::interfaces::http::middleware::{
    establish_session, resolve_session_user, session_err, LOGIN_PAGE, SESSION_USER_KEY,
};
use crate::interfaces::http::modules::pages::{PageResult, Templates};

/// Where a successful login lands.
pub const DASHBOARD_PAGE: &str = "/dashboard";

/// Auth handler state: concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct AuthHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
    pub templates: Templates,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session is logged in", body = SessionStatus),
        (status = 401, description = "Not logged in", body = ApiResponse)
    )
)]
pub async fn session_status(
    State(state): State<AuthHandlerState>,
    session: Session,
) -> Result<Json<SessionStatus>, DomainError> {
    let user = resolve_session_user(&session, &state.user_service).await?;
    Ok(Json(SessionStatus {
        user_id: user.id,
        rol: user.role.as_str().to_string(),
    }))
}

pub async fn login_form(State(state): State<AuthHandlerState>) -> PageResult {
    state.templates.render("login", &json!({}))
}

pub async fn login_submit(
    State(state): State<AuthHandlerState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> PageResult {
    let user = match state.user_service.login(&form.username, &form.password).await {
        Ok(user) => user,
        Err(e @ DomainError::InvalidCredentials) => {
            return state.templates.render_with_status(
                status_for(&e),
                "login",
                &json!({ "error": public_message(&e) }),
            );
        }
        Err(e) => return Err(state.templates.fail(e)),
    };

    establish_session(&session, &user)
        .await
        .map_err(|e| state.templates.fail(e))?;

    Ok(Redirect::to(DASHBOARD_PAGE).into_response())
}

pub async fn register_form(State(state): State<AuthHandlerState>) -> PageResult {
    state.templates.render("register", &json!({}))
}

pub async fn register_submit(
    State(state): State<AuthHandlerState>,
    Form(form): Form<RegisterForm>,
) -> PageResult {
    let registration = Registration {
        username: form.username,
        email: form.email,
        password: form.password,
        role: form.rol,
    };
    let username = registration.username.trim().to_string();
    let email = registration.email.trim().to_string();

    match state.user_service.register(registration).await {
        Ok(user) => state
            .templates
            .render("dashboard_principal", &json!({ "registered": user.username })),
        Err(
            e @ (DomainError::Validation(_)
            | DomainError::DuplicateUsername
            | DomainError::DuplicateEmail),
        ) => state.templates.render_with_status(
            status_for(&e),
            "register",
            &json!({ "error": public_message(&e), "username": username, "email": email }),
        ),
        Err(e) => Err(state.templates.fail(e)),
    }
}

/// Drop the session and go back to the login form.
pub async fn logout(session: Session) -> Response {
    let user_id = session.get::<i32>(SESSION_USER_KEY).await;
    if let Err(e) = session.flush().await {
        return session_err(e).into_response();
    }
    if let Ok(Some(user_id)) = user_id {
        tracing::info!(user_id, "User logged out");
    }
    Redirect::to(LOGIN_PAGE).into_response()
}
