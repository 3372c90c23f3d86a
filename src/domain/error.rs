use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    /// Deliberately carries no detail: unknown user and wrong password
    /// must be indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
