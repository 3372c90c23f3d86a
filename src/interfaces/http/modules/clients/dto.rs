//! Client DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ClientDetails, ClientStats, ConsumptionPoint};

/// Descriptive fields taken from the client's first reading.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientDetailsDto {
    #[serde(rename = "ClientID")]
    pub client_id: i32,
    #[serde(rename = "Locatie")]
    pub locatie: String,
    #[serde(rename = "StatusContor")]
    pub status_contor: String,
    #[serde(rename = "TipClient")]
    pub tip_client: String,
}

impl From<ClientDetails> for ClientDetailsDto {
    fn from(d: ClientDetails) -> Self {
        Self {
            client_id: d.client_id,
            locatie: d.location,
            status_contor: d.meter_status,
            tip_client: d.client_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConsumptionPointDto {
    #[serde(rename = "DataCitire")]
    pub data_citire: NaiveDate,
    #[serde(rename = "Consum_kWh")]
    pub consum_kwh: f64,
}

impl From<ConsumptionPoint> for ConsumptionPointDto {
    fn from(p: ConsumptionPoint) -> Self {
        Self {
            data_citire: p.reading_date,
            consum_kwh: p.consumption_kwh,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientStatsDto {
    pub consum_mediu: f64,
    pub consum_maxim: f64,
    pub consum_minim: f64,
}

impl From<ClientStats> for ClientStatsDto {
    fn from(s: ClientStats) -> Self {
        Self {
            consum_mediu: s.average_kwh,
            consum_maxim: s.max_kwh,
            consum_minim: s.min_kwh,
        }
    }
}
