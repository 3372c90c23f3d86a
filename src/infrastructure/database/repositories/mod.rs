//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod reading_repository;
pub mod user_repository;

pub use reading_repository::ReadingRepository;
pub use user_repository::UserRepository;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::StoreUnavailable(e.to_string())
}

/// Escape `LIKE` wildcards so user input only matches literally (escape char `\`).
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_wildcards_and_escape_char() {
        assert_eq!(escape_like("ion"), "ion");
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }
}
