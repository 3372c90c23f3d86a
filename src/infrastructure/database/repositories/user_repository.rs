use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use super::{db_err, escape_like};
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password,
        role: UserRole::parse(&model.rol),
    }
}

/// `LOWER(col) = lower(value)`
fn lower_eq(column: user::Column, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value.to_lowercase())
}

fn insert_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.to_lowercase().contains("email") => {
            DomainError::DuplicateEmail
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateUsername,
        _ => db_err(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(dto.username),
            email: Set(dto.email),
            password: Set(dto.password_hash),
            rol: Set(dto.role.as_str().to_string()),
        };

        let model = new_user.insert(&self.db).await.map_err(insert_err)?;
        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(lower_eq(user::Column::Username, username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(lower_eq(user::Column::Email, email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn search_users(&self, username: Option<&str>) -> DomainResult<Vec<User>> {
        let mut query = user::Entity::find();

        if let Some(needle) = username.filter(|n| !n.is_empty()) {
            let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(user::Column::Username)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let models = query
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update_user_role(&self, id: i32, role: &UserRole) -> DomainResult<bool> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Rol, Expr::value(role.as_str()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
