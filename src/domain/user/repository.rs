use async_trait::async_trait;

use super::{CreateUserDto, User, UserRole};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// Username match is case-insensitive.
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    /// Email match is case-insensitive.
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    /// Case-insensitive substring search on username; `None` lists everyone.
    async fn search_users(&self, username: Option<&str>) -> DomainResult<Vec<User>>;
    async fn count_users(&self) -> DomainResult<u64>;

    /// Returns `false` when no user has the given id.
    async fn update_user_role(&self, id: i32, role: &UserRole) -> DomainResult<bool>;
}
