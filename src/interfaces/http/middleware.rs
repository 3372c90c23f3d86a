//! Session authentication middleware for Axum
//!
//! The session only holds the user id. Every protected request reloads the
//! user row and inserts a [`CurrentUser`] into request extensions.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::application::UserService;
use crate::domain::{DomainError, DomainResult, User, UserRole};
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::modules::pages::Templates;

/// Session key holding the logged-in user's id.
pub const SESSION_USER_KEY: &str = "user_id";

/// Where unauthenticated page requests are sent.
pub const LOGIN_PAGE: &str = "/login_web";

/// State needed to resolve a session into a user.
#[derive(Clone)]
pub struct SessionAuthState {
    pub user_service: Arc<UserService<UserRepository>>,
}

/// The user behind the current session, reloaded from storage.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "user {} with role '{}' needs admin",
                self.id, self.role
            )))
        }
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

pub(crate) fn session_err(e: tower_sessions::session::Error) -> DomainError {
    DomainError::Internal(format!("Session store error: {}", e))
}

/// Start an authenticated session for `user` under a fresh session id.
pub async fn establish_session(session: &Session, user: &User) -> DomainResult<()> {
    session.cycle_id().await.map_err(session_err)?;
    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(session_err)
}

/// Resolve the session into a user.
///
/// A session whose user no longer exists is flushed.
pub async fn resolve_session_user(
    session: &Session,
    users: &UserService<UserRepository>,
) -> DomainResult<CurrentUser> {
    let user_id = session
        .get::<i32>(SESSION_USER_KEY)
        .await
        .map_err(session_err)?
        .ok_or(DomainError::Unauthenticated)?;

    match users.get_user_by_id(user_id).await? {
        Some(user) => Ok(CurrentUser::from(user)),
        None => {
            tracing::info!(user_id, "Session refers to a missing user, flushing");
            session.flush().await.map_err(session_err)?;
            Err(DomainError::Unauthenticated)
        }
    }
}

/// Session guard for JSON routes: 401 envelope when not logged in.
pub async fn require_api_session(
    State(state): State<SessionAuthState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match resolve_session_user(&session, &state.user_service).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Admin-only JSON middleware - must be used after `require_api_session`
pub async fn admin_api_middleware(request: Request<Body>, next: Next) -> Response {
    let check = match request.extensions().get::<CurrentUser>() {
        Some(user) => user.require_admin(),
        None => Err(DomainError::Unauthenticated),
    };

    match check {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Page routes share the session guard with JSON routes but answer
/// differently: a redirect to the login form, or a rendered error page.
#[derive(Clone)]
pub struct PageAuthState {
    pub auth: SessionAuthState,
    pub templates: Templates,
}

/// Session guard for HTML pages: redirect to the login form when not logged in.
pub async fn require_page_session(
    State(state): State<PageAuthState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match resolve_session_user(&session, &state.auth.user_service).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(DomainError::Unauthenticated) => Redirect::to(LOGIN_PAGE).into_response(),
        Err(e) => state.templates.error_response(e),
    }
}

/// Admin-only page middleware - must be used after `require_page_session`
pub async fn admin_page_middleware(
    State(state): State<PageAuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let check = match request.extensions().get::<CurrentUser>() {
        Some(user) => user.require_admin(),
        None => return Redirect::to(LOGIN_PAGE).into_response(),
    };

    match check {
        Ok(()) => next.run(request).await,
        Err(e) => state.templates.error_response(e),
    }
}
