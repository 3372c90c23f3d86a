//! Reporting service: dashboard aggregates and per-client views
//!
//! Every method maps to exactly one repository call. The service owns the
//! "absent means 404" decisions so handlers stay thin.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    ClientDetails, ClientStats, ClientTotal, ConsumptionPoint, DateRange, DomainError,
    DomainResult, PeriodSummary, Reading, ReadingRepositoryInterface, ReadingUpdate,
    TOP_CONSUMERS_LIMIT,
};

/// Format of `start_date` / `end_date` query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build an inclusive range from raw query values.
pub fn parse_date_range(start: Option<&str>, end: Option<&str>) -> DomainResult<DateRange> {
    let start = parse_date("start_date", start)?;
    let end = parse_date("end_date", end)?;
    DateRange::new(start, end)
}

fn parse_date(name: &str, value: Option<&str>) -> DomainResult<NaiveDate> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::Validation(format!("{} is required", name)))?;

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        DomainError::Validation(format!("{} must be YYYY-MM-DD, got '{}'", name, value))
    })
}

pub struct ReportingService<R: ReadingRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: ReadingRepositoryInterface> ReportingService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    // ── Dashboard aggregates ────────────────────────────────────

    pub async fn period_summary(&self, range: DateRange) -> DomainResult<PeriodSummary> {
        self.repo.period_summary(range).await
    }

    pub async fn top_consumers(&self, range: DateRange) -> DomainResult<Vec<ClientTotal>> {
        self.repo.top_consumers(range, TOP_CONSUMERS_LIMIT).await
    }

    pub async fn faulty_meter_clients(&self) -> DomainResult<Vec<i32>> {
        self.repo.faulty_meter_clients().await
    }

    // ── Per-client views ────────────────────────────────────────

    pub async fn client_details(&self, client_id: i32) -> DomainResult<ClientDetails> {
        self.repo
            .first_reading_for_client(client_id)
            .await?
            .map(ClientDetails::from)
            .ok_or_else(|| DomainError::not_found("Client", "ClientID", client_id))
    }

    pub async fn client_time_series(&self, client_id: i32) -> DomainResult<Vec<ConsumptionPoint>> {
        self.repo.client_time_series(client_id).await
    }

    pub async fn client_stats(&self, client_id: i32) -> DomainResult<ClientStats> {
        self.repo
            .client_stats(client_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", "ClientID", client_id))
    }

    // ── Readings ────────────────────────────────────────────────

    pub async fn list_readings(&self, client_id: Option<i32>) -> DomainResult<Vec<Reading>> {
        self.repo.list_readings(client_id).await
    }

    /// Overwrite every mutable column of one reading.
    pub async fn update_reading(&self, id: i32, update: ReadingUpdate) -> DomainResult<()> {
        if self.repo.update_reading(id, update).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("Reading", "id", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::ReadingRepository;
    use crate::test_support::{date, memory_db, seed_reading};

    #[test]
    fn date_range_requires_both_bounds() {
        assert!(parse_date_range(Some("2024-01-01"), Some("2024-01-31")).is_ok());
        assert!(matches!(
            parse_date_range(None, Some("2024-01-31")),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            parse_date_range(Some("01/01/2024"), Some("2024-01-31")),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            parse_date_range(Some("2024-02-01"), Some("2024-01-31")),
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_client_is_not_found() {
        let db = memory_db().await;
        seed_reading(&db, 1, "ok", 12.5, "2024-01-10").await;
        let svc = ReportingService::new(Arc::new(ReadingRepository::new(db)));

        let details = svc.client_details(1).await.unwrap();
        assert_eq!(details.client_id, 1);
        assert_eq!(details.location, "Locatie 1");

        assert!(matches!(
            svc.client_details(2).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            svc.client_stats(2).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(svc.client_time_series(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_unknown_reading_is_not_found() {
        let db = memory_db().await;
        let svc = ReportingService::new(Arc::new(ReadingRepository::new(db)));

        let update = ReadingUpdate {
            client_id: 1,
            location: "Cluj".into(),
            meter_status: "ok".into(),
            client_type: "casnic".into(),
            consumption_kwh: 1.0,
            reading_date: date("2024-01-01"),
        };
        assert!(matches!(
            svc.update_reading(42, update).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
