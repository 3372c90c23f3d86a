//! Dashboard API handlers
//!
//! Read-only aggregates, open to every logged-in user.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::dto::{ClientTotalDto, DateRangeParams, FaultyClientDto, SummaryDto};
use crate::application::reporting::parse_date_range;
use crate::application::ReportingService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::ReadingRepository;
use crate::interfaces::http::common::{ApiQuery, ApiResponse};

#[derive(Clone)]
pub struct DashboardState {
    pub reports: Arc<ReportingService<ReadingRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/dashboard/Sume",
    tag = "Dashboard",
    params(DateRangeParams),
    responses(
        (status = 200, description = "Total and mean consumption", body = SummaryDto),
        (status = 400, description = "Missing or malformed dates", body = ApiResponse),
        (status = 401, description = "Not logged in", body = ApiResponse)
    )
)]
pub async fn period_summary(
    State(state): State<DashboardState>,
    ApiQuery(params): ApiQuery<DateRangeParams>,
) -> Result<Json<SummaryDto>, DomainError> {
    let range = parse_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let summary = state.reports.period_summary(range).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/top5",
    tag = "Dashboard",
    params(DateRangeParams),
    responses(
        (status = 200, description = "Largest consumers, biggest first", body = Vec<ClientTotalDto>),
        (status = 400, description = "Missing or malformed dates", body = ApiResponse),
        (status = 401, description = "Not logged in", body = ApiResponse)
    )
)]
pub async fn top_consumers(
    State(state): State<DashboardState>,
    ApiQuery(params): ApiQuery<DateRangeParams>,
) -> Result<Json<Vec<ClientTotalDto>>, DomainError> {
    let range = parse_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let top = state.reports.top_consumers(range).await?;
    Ok(Json(top.into_iter().map(ClientTotalDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/defect",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Clients with a defect meter reading", body = Vec<FaultyClientDto>),
        (status = 401, description = "Not logged in", body = ApiResponse)
    )
)]
pub async fn faulty_meters(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<FaultyClientDto>>, DomainError> {
    let clients = state.reports.faulty_meter_clients().await?;
    Ok(Json(
        clients
            .into_iter()
            .map(|client_id| FaultyClientDto { client_id })
            .collect(),
    ))
}
