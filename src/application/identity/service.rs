//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};
use validator::{Validate, ValidationError};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Shown for any missing registration field.
pub const MISSING_FIELDS_MESSAGE: &str = "Completează toate câmpurile!";

/// Knobs for hashing and self-registration.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    pub bcrypt_cost: u32,
    /// Whether self-registration may request the `admin` role.
    pub allow_admin_role: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allow_admin_role: false,
        }
    }
}

/// Registration input as submitted by the form.
#[derive(Debug, Clone, Default, Validate)]
pub struct Registration {
    #[validate(
        length(max = 50, message = "Username prea lung (maxim 50 caractere)"),
        custom(
            function = "username_charset",
            message = "Username-ul poate conține doar litere, cifre, '.', '_' și '-'"
        )
    )]
    pub username: String,
    #[validate(email(message = "Adresă de email invalidă"))]
    pub email: String,
    #[validate(length(min = 8, message = "Parola trebuie să aibă cel puțin 8 caractere"))]
    pub password: String,
    pub role: Option<String>,
}

/// User service: orchestrates all identity / user-management use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    policy: AuthPolicy,
    /// Verified against when the username is unknown, so both login
    /// failures cost one bcrypt verification.
    dummy_hash: String,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, policy: AuthPolicy) -> DomainResult<Self> {
        let dummy_hash = hash_password("energy-dashboard-dummy", policy.bcrypt_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(Self {
            repo,
            policy,
            dummy_hash,
        })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password.
    ///
    /// Unknown username and wrong password both yield
    /// [`DomainError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<User> {
        let user = self.repo.get_user_by_username(username.trim()).await?;

        let Some(user) = user else {
            let _ = verify_blocking(password.to_string(), self.dummy_hash.clone()).await?;
            warn!(username, "Login failed");
            return Err(DomainError::InvalidCredentials);
        };

        if !verify_blocking(password.to_string(), user.password_hash.clone()).await? {
            warn!(username, "Login failed");
            return Err(DomainError::InvalidCredentials);
        }

        info!(user_id = user.id, username = %user.username, role = %user.role, "User logged in");
        Ok(user)
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user. Username and email uniqueness is case-insensitive.
    pub async fn register(&self, registration: Registration) -> DomainResult<User> {
        let registration = Registration {
            username: registration.username.trim().to_string(),
            email: registration.email.trim().to_string(),
            ..registration
        };

        if registration.username.is_empty()
            || registration.email.is_empty()
            || registration.password.is_empty()
        {
            return Err(DomainError::Validation(MISSING_FIELDS_MESSAGE.into()));
        }

        registration
            .validate()
            .map_err(|e| DomainError::Validation(first_validation_message(&e)))?;

        let role = self.registration_role(registration.role.as_deref())?;

        if self
            .repo
            .get_user_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateUsername);
        }
        if self
            .repo
            .get_user_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash = self.hash(registration.password).await?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: registration.username,
                email: registration.email,
                role,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "New user registered");
        Ok(user)
    }

    fn registration_role(&self, requested: Option<&str>) -> DomainResult<UserRole> {
        let requested = requested.map(str::trim).filter(|r| !r.is_empty());
        let Some(requested) = requested else {
            return Ok(UserRole::User);
        };

        match UserRole::parse_assignable(requested) {
            Some(UserRole::Admin) if !self.policy.allow_admin_role => Err(DomainError::Validation(
                "Rolul admin nu poate fi ales la înregistrare".into(),
            )),
            Some(role) => Ok(role),
            None => Err(DomainError::Validation(format!("Rol invalid: {}", requested))),
        }
    }

    /// Create the bootstrap admin when no account exists yet.
    ///
    /// Returns `true` if an account was created.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<bool> {
        if self.repo.count_users().await? > 0 {
            return Ok(false);
        }

        let password_hash = self.hash(password.to_string()).await?;
        let admin = self
            .repo
            .create_user(CreateUserDto {
                username: username.to_string(),
                email: email.to_string(),
                role: UserRole::Admin,
                password_hash,
            })
            .await?;

        info!(user_id = admin.id, username = %admin.username, "Default admin created");
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    pub async fn search_users(&self, username: Option<&str>) -> DomainResult<Vec<User>> {
        self.repo.search_users(username).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Overwrite a user's role. Only `admin` and `user` are accepted.
    pub async fn update_role(&self, id: i32, role: &str) -> DomainResult<UserRole> {
        let role = UserRole::parse_assignable(role)
            .ok_or_else(|| DomainError::Validation(format!("Unknown role '{}'", role)))?;

        if !self.repo.update_user_role(id, &role).await? {
            return Err(DomainError::not_found("User", "id", id));
        }

        info!(user_id = id, role = %role, "User role updated");
        Ok(role)
    }

    async fn hash(&self, password: String) -> DomainResult<String> {
        let cost = self.policy.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }
}

/// A malformed stored hash counts as a mismatch.
async fn verify_blocking(password: String, hash: String) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash).unwrap_or(false))
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))
}

/// Usernames are rendered on admin pages; keep them to a markup-free set.
fn username_charset(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset"))
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Date invalide".to_string())
}
