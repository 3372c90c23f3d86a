use async_trait::async_trait;

use super::{
    ClientStats, ClientTotal, ConsumptionPoint, DateRange, PeriodSummary, Reading, ReadingUpdate,
};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReadingRepositoryInterface: Send + Sync {
    async fn period_summary(&self, range: DateRange) -> DomainResult<PeriodSummary>;
    /// Highest totals first, ties by ascending client id, at most `limit` rows.
    async fn top_consumers(&self, range: DateRange, limit: u64) -> DomainResult<Vec<ClientTotal>>;
    /// Distinct client ids with at least one `defect` meter status, ascending.
    async fn faulty_meter_clients(&self) -> DomainResult<Vec<i32>>;

    /// The client's lowest-id reading.
    async fn first_reading_for_client(&self, client_id: i32) -> DomainResult<Option<Reading>>;
    async fn list_readings(&self, client_id: Option<i32>) -> DomainResult<Vec<Reading>>;
    /// `false` when no reading has the given id.
    async fn update_reading(&self, id: i32, update: ReadingUpdate) -> DomainResult<bool>;

    async fn client_time_series(&self, client_id: i32) -> DomainResult<Vec<ConsumptionPoint>>;
    /// `None` when the client has no readings.
    async fn client_stats(&self, client_id: i32) -> DomainResult<Option<ClientStats>>;
}
