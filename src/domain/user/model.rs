//! User domain model

use std::fmt;

/// Role stored in `userweb.rol`.
///
/// The column is free text, so values other than `admin`/`user` survive a
/// round-trip as [`UserRole::Unknown`] instead of failing to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    User,
    Unknown(String),
}

impl UserRole {
    /// Roles that may be assigned through the API or registration.
    pub const ASSIGNABLE: [&'static str; 2] = ["admin", "user"];

    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "user" => Self::User,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Parse a role coming from client input, rejecting unknown values.
    pub fn parse_assignable(value: &str) -> Option<Self> {
        match Self::parse(value.trim()) {
            Self::Unknown(_) => None,
            role => Some(role),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Unknown(other) => other,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_unknown_roles() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("user"), UserRole::User);
        assert_eq!(
            UserRole::parse("auditor"),
            UserRole::Unknown("auditor".to_string())
        );
        assert_eq!(UserRole::parse("auditor").as_str(), "auditor");
    }

    #[test]
    fn assignable_roles_reject_unknown_values() {
        assert_eq!(UserRole::parse_assignable(" admin "), Some(UserRole::Admin));
        assert_eq!(UserRole::parse_assignable("Admin"), None);
        assert_eq!(UserRole::parse_assignable(""), None);
    }
}
