//! Reading API handlers
//!
//! Listing is open to every logged-in user; updates need admin.

use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};

use super::dto::{ListReadingsParams, ReadingDto, UpdateReadingRequest};
use crate::application::ReportingService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::ReadingRepository;
use crate::interfaces::http::common::{ApiPath, ApiQuery, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;

#[derive(Clone)]
pub struct ReadingHandlerState {
    pub reports: Arc<ReportingService<ReadingRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/consum_energie",
    tag = "Readings",
    params(ListReadingsParams),
    responses(
        (status = 200, description = "Readings ordered by id", body = Vec<ReadingDto>),
        (status = 401, description = "Not logged in", body = ApiResponse)
    )
)]
pub async fn list_readings(
    State(state): State<ReadingHandlerState>,
    ApiQuery(params): ApiQuery<ListReadingsParams>,
) -> Result<Json<Vec<ReadingDto>>, DomainError> {
    let readings = state.reports.list_readings(params.client_id).await?;
    Ok(Json(readings.into_iter().map(ReadingDto::from).collect()))
}

#[utoipa::path(
    put,
    path = "/api/consum_energie/{id}",
    tag = "Readings",
    params(("id" = i32, Path, description = "Reading ID")),
    request_body = UpdateReadingRequest,
    responses(
        (status = 200, description = "Reading overwritten", body = ApiResponse),
        (status = 400, description = "Malformed or incomplete body", body = ApiResponse),
        (status = 403, description = "Admin role required", body = ApiResponse),
        (status = 404, description = "Unknown reading", body = ApiResponse),
        (status = 422, description = "Field rule violated", body = ApiResponse)
    )
)]
pub async fn update_reading(
    State(state): State<ReadingHandlerState>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateReadingRequest>,
) -> Result<Json<ApiResponse>, DomainError> {
    state.reports.update_reading(id, request.into()).await?;
    tracing::info!(reading_id = id, by_user = user.id, "Reading overwritten via API");
    Ok(Json(ApiResponse::ok()))
}
