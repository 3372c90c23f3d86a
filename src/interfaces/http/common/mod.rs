//! Common API types shared by every JSON handler

pub mod extract;

pub use extract::{ApiPath, ApiQuery, ApiRejection, ValidatedJson};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API envelope.
///
/// Mutations answer `{"success": true}`, failures answer
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for each domain failure.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::DuplicateUsername | DomainError::DuplicateEmail => StatusCode::CONFLICT,
        DomainError::InvalidCredentials | DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::StoreUnavailable(_) | DomainError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Message safe to show to a client. Store and internal details stay in logs.
pub fn public_message(err: &DomainError) -> String {
    match err {
        DomainError::DuplicateUsername => "Username deja există!".to_string(),
        DomainError::DuplicateEmail => "Email deja există!".to_string(),
        DomainError::InvalidCredentials => "Login greșit".to_string(),
        DomainError::Unauthenticated => "Not logged in".to_string(),
        DomainError::Forbidden(_) => "Acces interzis".to_string(),
        DomainError::NotFound { entity: "Client", .. } => "Clientul nu exista".to_string(),
        DomainError::NotFound { entity, field, value } => {
            format!("{} with {}={} not found", entity, field, value)
        }
        DomainError::Validation(msg) => msg.clone(),
        DomainError::StoreUnavailable(_) => "Database unavailable".to_string(),
        DomainError::Internal(_) => "Internal server error".to_string(),
    }
}

/// Log the error at a level matching its severity.
pub fn log_error(err: &DomainError) {
    match err {
        DomainError::StoreUnavailable(detail) => {
            tracing::error!(error = %detail, "Store failure")
        }
        DomainError::Internal(detail) => tracing::error!(error = %detail, "Internal failure"),
        DomainError::Forbidden(reason) => tracing::warn!(reason = %reason, "Access denied"),
        other => tracing::debug!(error = %other, "Request rejected"),
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        log_error(&self);
        let body = ApiResponse::error(public_message(&self));
        (status_for(&self), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_omits_error() {
        let json = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));
    }

    #[test]
    fn store_details_do_not_leak() {
        let err = DomainError::StoreUnavailable("no such table: userweb".into());
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!public_message(&err).contains("userweb"));
    }

    #[test]
    fn missing_client_uses_client_message() {
        let err = DomainError::not_found("Client", "ClientID", 7);
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
        assert_eq!(public_message(&err), "Clientul nu exista");
    }
}
