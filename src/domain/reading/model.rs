//! Meter reading domain model and report shapes

use chrono::NaiveDate;

use crate::domain::{DomainError, DomainResult};

/// Maximum number of entries in the top-consumers report.
pub const TOP_CONSUMERS_LIMIT: u64 = 5;

/// One meter reading for one client on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub id: i32,
    pub client_id: i32,
    pub location: String,
    pub meter_status: String,
    pub client_type: String,
    pub consumption_kwh: f64,
    pub reading_date: NaiveDate,
}

/// Full-row overwrite of every mutable reading column.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingUpdate {
    pub client_id: i32,
    pub location: String,
    pub meter_status: String,
    pub client_type: String,
    pub consumption_kwh: f64,
    pub reading_date: NaiveDate,
}

/// Inclusive date range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::Validation(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Total and mean consumption over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub total_kwh: f64,
    /// `None` when the range contains no readings.
    pub average_kwh: Option<f64>,
    pub readings: u64,
}

impl PeriodSummary {
    pub fn from_totals(sum: Option<f64>, readings: u64) -> Self {
        let total_kwh = sum.unwrap_or(0.0);
        let average_kwh = (readings > 0).then(|| total_kwh / readings as f64);
        Self {
            total_kwh,
            average_kwh,
            readings,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientTotal {
    pub client_id: i32,
    pub total_kwh: f64,
}

/// Descriptive fields of a client, taken from one of its readings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDetails {
    pub client_id: i32,
    pub location: String,
    pub meter_status: String,
    pub client_type: String,
}

impl From<Reading> for ClientDetails {
    fn from(r: Reading) -> Self {
        Self {
            client_id: r.client_id,
            location: r.location,
            meter_status: r.meter_status,
            client_type: r.client_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionPoint {
    pub reading_date: NaiveDate,
    pub consumption_kwh: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientStats {
    pub average_kwh: f64,
    pub max_kwh: f64,
    pub min_kwh: f64,
}
