//! User management API handlers
//!
//! Admin-only endpoints, gated by `admin_api_middleware`.
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::dto::{ListUsersParams, UpdateRoleRequest, UserDto};
use crate::application::UserService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiPath, ApiQuery, ApiResponse, ValidatedJson};

/// User handler state: concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/userweb",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Users ordered by id", body = Vec<UserDto>),
        (status = 401, description = "Not logged in", body = ApiResponse),
        (status = 403, description = "Admin role required", body = ApiResponse)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    ApiQuery(params): ApiQuery<ListUsersParams>,
) -> Result<Json<Vec<UserDto>>, DomainError> {
    let users = state
        .user_service
        .search_users(params.username.as_deref())
        .await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    put,
    path = "/api/userweb/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse),
        (status = 400, description = "Unknown role", body = ApiResponse),
        (status = 403, description = "Admin role required", body = ApiResponse),
        (status = 404, description = "Unknown user", body = ApiResponse)
    )
)]
pub async fn update_user_role(
    State(state): State<UserHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<ApiResponse>, DomainError> {
    state.user_service.update_role(id, &request.rol).await?;
    Ok(Json(ApiResponse::ok()))
}
