//! Reading DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Reading, ReadingUpdate};

/// One `consum_energie` row, keyed by column name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    pub id: i32,
    #[serde(rename = "ClientID")]
    pub client_id: i32,
    #[serde(rename = "Locatie")]
    pub locatie: String,
    #[serde(rename = "StatusContor")]
    pub status_contor: String,
    #[serde(rename = "TipClient")]
    pub tip_client: String,
    #[serde(rename = "Consum_kWh")]
    pub consum_kwh: f64,
    #[serde(rename = "DataCitire")]
    pub data_citire: NaiveDate,
}

impl From<Reading> for ReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            id: r.id,
            client_id: r.client_id,
            locatie: r.location,
            status_contor: r.meter_status,
            tip_client: r.client_type,
            consum_kwh: r.consumption_kwh,
            data_citire: r.reading_date,
        }
    }
}

/// Full-row replacement body for `PUT /api/consum_energie/{id}`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReadingRequest {
    #[serde(rename = "ClientID")]
    #[validate(range(min = 1, message = "ClientID must be positive"))]
    pub client_id: i32,
    #[serde(rename = "Locatie")]
    #[validate(length(min = 1, max = 100, message = "Locatie is required (max 100)"))]
    pub locatie: String,
    #[serde(rename = "StatusContor")]
    #[validate(length(min = 1, max = 20, message = "StatusContor is required (max 20)"))]
    pub status_contor: String,
    #[serde(rename = "TipClient")]
    #[validate(length(min = 1, max = 50, message = "TipClient is required (max 50)"))]
    pub tip_client: String,
    #[serde(rename = "Consum_kWh")]
    #[validate(range(min = 0.0, message = "Consum_kWh cannot be negative"))]
    pub consum_kwh: f64,
    /// `YYYY-MM-DD`
    #[serde(rename = "DataCitire")]
    pub data_citire: NaiveDate,
}

impl From<UpdateReadingRequest> for ReadingUpdate {
    fn from(r: UpdateReadingRequest) -> Self {
        Self {
            client_id: r.client_id,
            location: r.locatie,
            meter_status: r.status_contor,
            client_type: r.tip_client,
            consumption_kwh: r.consum_kwh,
            reading_date: r.data_citire,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListReadingsParams {
    /// Only rows for this client; empty means no filter
    #[serde(default, deserialize_with = "blank_as_none")]
    pub client_id: Option<i32>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(query: &str) -> Result<ListReadingsParams, String> {
        let uri: Uri = format!("/api/consum_energie?{}", query).parse().unwrap();
        Query::<ListReadingsParams>::try_from_uri(&uri)
            .map(|Query(params)| params)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn client_filter_treats_blank_as_absent() {
        assert_eq!(parse("").unwrap().client_id, None);
        assert_eq!(parse("client_id=").unwrap().client_id, None);
        assert_eq!(parse("client_id=%20").unwrap().client_id, None);
        assert_eq!(parse("client_id=7").unwrap().client_id, Some(7));
        assert!(parse("client_id=abc").is_err());
    }
}
