//! Dashboard DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ClientTotal, PeriodSummary};

/// Inclusive reporting window, both bounds `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Sum and mean of `Consum_kWh` over the window.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryDto {
    pub total_consum: f64,
    /// `null` when no reading falls in the window
    pub mediu_consum: Option<f64>,
}

impl From<PeriodSummary> for SummaryDto {
    fn from(s: PeriodSummary) -> Self {
        Self {
            total_consum: s.total_kwh,
            mediu_consum: s.average_kwh,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientTotalDto {
    #[serde(rename = "ClientID")]
    pub client_id: i32,
    pub total: f64,
}

impl From<ClientTotal> for ClientTotalDto {
    fn from(t: ClientTotal) -> Self {
        Self {
            client_id: t.client_id,
            total: t.total_kwh,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FaultyClientDto {
    #[serde(rename = "ClientID")]
    pub client_id: i32,
}
