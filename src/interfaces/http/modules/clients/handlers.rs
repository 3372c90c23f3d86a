//! Client API handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::dto::{ClientDetailsDto, ClientStatsDto, ConsumptionPointDto};
use crate::application::ReportingService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::ReadingRepository;
use crate::interfaces::http::common::{ApiPath, ApiResponse};

#[derive(Clone)]
pub struct ClientState {
    pub reports: Arc<ReportingService<ReadingRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/client/{client_id}",
    tag = "Clients",
    params(("client_id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client details", body = ClientDetailsDto),
        (status = 404, description = "Client has no readings", body = ApiResponse)
    )
)]
pub async fn get_client(
    State(state): State<ClientState>,
    ApiPath(client_id): ApiPath<i32>,
) -> Result<Json<ClientDetailsDto>, DomainError> {
    let details = state.reports.client_details(client_id).await?;
    Ok(Json(details.into()))
}

#[utoipa::path(
    get,
    path = "/api/client/{client_id}/consum",
    tag = "Clients",
    params(("client_id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Readings in date order", body = Vec<ConsumptionPointDto>)
    )
)]
pub async fn client_consumption(
    State(state): State<ClientState>,
    ApiPath(client_id): ApiPath<i32>,
) -> Result<Json<Vec<ConsumptionPointDto>>, DomainError> {
    let series = state.reports.client_time_series(client_id).await?;
    Ok(Json(series.into_iter().map(ConsumptionPointDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/client/{client_id}/statistici",
    tag = "Clients",
    params(("client_id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Mean, max and min consumption", body = ClientStatsDto),
        (status = 404, description = "Client has no readings", body = ApiResponse)
    )
)]
pub async fn client_statistics(
    State(state): State<ClientState>,
    ApiPath(client_id): ApiPath<i32>,
) -> Result<Json<ClientStatsDto>, DomainError> {
    let stats = state.reports.client_stats(client_id).await?;
    Ok(Json(stats.into()))
}
