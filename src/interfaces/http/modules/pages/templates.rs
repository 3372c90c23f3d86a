//! Handlebars template registry
//!
//! Templates are embedded in the binary and registered once at startup.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use crate::domain::DomainError;
use crate::interfaces::http::common::{log_error, public_message, status_for};
use crate::interfaces::http::middleware::LOGIN_PAGE;

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("../../../../../templates/login.hbs")),
    ("register", include_str!("../../../../../templates/register.hbs")),
    (
        "dashboard_principal",
        include_str!("../../../../../templates/dashboard_principal.hbs"),
    ),
    ("dashboard", include_str!("../../../../../templates/dashboard.hbs")),
    (
        "dashboard_user",
        include_str!("../../../../../templates/dashboard_user.hbs"),
    ),
    ("sume", include_str!("../../../../../templates/sume.hbs")),
    ("top5", include_str!("../../../../../templates/top5.hbs")),
    ("alerte", include_str!("../../../../../templates/alerte.hbs")),
    ("clienti", include_str!("../../../../../templates/clienti.hbs")),
    ("userweb", include_str!("../../../../../templates/userweb.hbs")),
    (
        "select_client",
        include_str!("../../../../../templates/select_client.hbs"),
    ),
    (
        "client_detalii",
        include_str!("../../../../../templates/client_detalii.hbs"),
    ),
    (
        "client_statistici",
        include_str!("../../../../../templates/client_statistici.hbs"),
    ),
    (
        "client_consum",
        include_str!("../../../../../templates/client_consum.hbs"),
    ),
    ("error", include_str!("../../../../../templates/error.hbs")),
];

/// Shared, read-only template registry.
#[derive(Clone)]
pub struct Templates {
    registry: Arc<Handlebars<'static>>,
}

impl Templates {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    /// Render `name` with `context`.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> PageResult {
        self.render_with_status(StatusCode::OK, name, context)
    }

    pub fn render_with_status<T: Serialize>(
        &self,
        status: StatusCode,
        name: &str,
        context: &T,
    ) -> PageResult {
        match self.registry.render(name, context) {
            Ok(html) => Ok((status, Html(html)).into_response()),
            Err(e) => {
                tracing::error!(template = name, error = %e, "Template render failed");
                Err(PageError(
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response(),
                ))
            }
        }
    }

    /// Turn a domain failure into the page a browser should see.
    pub fn error_response(&self, err: DomainError) -> Response {
        if matches!(err, DomainError::Unauthenticated) {
            return Redirect::to(LOGIN_PAGE).into_response();
        }

        log_error(&err);
        let status = status_for(&err);
        let context = json!({
            "status": status.as_u16(),
            "message": public_message(&err),
        });
        match self.render_with_status(status, "error", &context) {
            Ok(response) | Err(PageError(response)) => response,
        }
    }

    /// Shorthand for page handlers: `templates.fail(err)?`.
    pub fn fail(&self, err: DomainError) -> PageError {
        PageError(self.error_response(err))
    }
}

/// A page failure already rendered into a response.
pub struct PageError(pub Response);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0
    }
}

pub type PageResult = Result<Response, PageError>;
