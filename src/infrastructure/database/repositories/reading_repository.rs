//! Reading repository
//!
//! Filtering, grouping and aggregation are pushed down to SQL; only the
//! report rows travel back.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::db_err;
use crate::domain::{
    ClientStats, ClientTotal, ConsumptionPoint, DateRange, DomainResult, PeriodSummary, Reading,
    ReadingRepositoryInterface, ReadingUpdate,
};
use crate::infrastructure::database::entities::reading;

/// Meter status marking a faulty meter.
const DEFECT_STATUS: &str = "defect";

pub struct ReadingRepository {
    db: DatabaseConnection,
}

impl ReadingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Projection rows ─────────────────────────────────────────────

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    total: Option<f64>,
    readings: i64,
}

#[derive(Debug, FromQueryResult)]
struct ClientTotalRow {
    client_id: i32,
    total: f64,
}

#[derive(Debug, FromQueryResult)]
struct ClientIdRow {
    client_id: i32,
}

#[derive(Debug, FromQueryResult)]
struct StatsRow {
    total: Option<f64>,
    max_kwh: Option<f64>,
    min_kwh: Option<f64>,
    readings: i64,
}

fn reading_model_to_domain(model: reading::Model) -> Reading {
    Reading {
        id: model.id,
        client_id: model.client_id,
        location: model.locatie,
        meter_status: model.status_contor,
        client_type: model.tip_client,
        consumption_kwh: model.consum_kwh,
        reading_date: model.data_citire,
    }
}

fn in_range(range: DateRange) -> sea_orm::Condition {
    sea_orm::Condition::all().add(reading::Column::DataCitire.between(range.start(), range.end()))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ReadingRepositoryInterface for ReadingRepository {
    async fn period_summary(&self, range: DateRange) -> DomainResult<PeriodSummary> {
        let row = reading::Entity::find()
            .select_only()
            .column_as(Expr::col(reading::Column::ConsumKwh).sum(), "total")
            .column_as(Expr::col(reading::Column::Id).count(), "readings")
            .filter(in_range(range))
            .into_model::<TotalsRow>()
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(match row {
            Some(row) => PeriodSummary::from_totals(row.total, row.readings.max(0) as u64),
            None => PeriodSummary::from_totals(None, 0),
        })
    }

    async fn top_consumers(&self, range: DateRange, limit: u64) -> DomainResult<Vec<ClientTotal>> {
        let rows = reading::Entity::find()
            .select_only()
            .column_as(reading::Column::ClientId, "client_id")
            .column_as(Expr::col(reading::Column::ConsumKwh).sum(), "total")
            .filter(in_range(range))
            .group_by(reading::Column::ClientId)
            .order_by_desc(Expr::col(reading::Column::ConsumKwh).sum())
            .order_by_asc(reading::Column::ClientId)
            .limit(limit)
            .into_model::<ClientTotalRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| ClientTotal {
                client_id: r.client_id,
                total_kwh: r.total,
            })
            .collect())
    }

    async fn faulty_meter_clients(&self) -> DomainResult<Vec<i32>> {
        let rows = reading::Entity::find()
            .select_only()
            .column_as(reading::Column::ClientId, "client_id")
            .distinct()
            .filter(reading::Column::StatusContor.eq(DEFECT_STATUS))
            .order_by_asc(reading::Column::ClientId)
            .into_model::<ClientIdRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.client_id).collect())
    }

    async fn first_reading_for_client(&self, client_id: i32) -> DomainResult<Option<Reading>> {
        let model = reading::Entity::find()
            .filter(reading::Column::ClientId.eq(client_id))
            .order_by_asc(reading::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(reading_model_to_domain))
    }

    async fn list_readings(&self, client_id: Option<i32>) -> DomainResult<Vec<Reading>> {
        let mut query = reading::Entity::find();
        if let Some(client_id) = client_id {
            query = query.filter(reading::Column::ClientId.eq(client_id));
        }

        let models = query
            .order_by_asc(reading::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(reading_model_to_domain).collect())
    }

    async fn update_reading(&self, id: i32, update: ReadingUpdate) -> DomainResult<bool> {
        let result = reading::Entity::update_many()
            .col_expr(reading::Column::ClientId, Expr::value(update.client_id))
            .col_expr(reading::Column::Locatie, Expr::value(update.location))
            .col_expr(reading::Column::StatusContor, Expr::value(update.meter_status))
            .col_expr(reading::Column::TipClient, Expr::value(update.client_type))
            .col_expr(reading::Column::ConsumKwh, Expr::value(update.consumption_kwh))
            .col_expr(reading::Column::DataCitire, Expr::value(update.reading_date))
            .filter(reading::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn client_time_series(&self, client_id: i32) -> DomainResult<Vec<ConsumptionPoint>> {
        let models = reading::Entity::find()
            .filter(reading::Column::ClientId.eq(client_id))
            .order_by_asc(reading::Column::DataCitire)
            .order_by_asc(reading::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .map(|m| ConsumptionPoint {
                reading_date: m.data_citire,
                consumption_kwh: m.consum_kwh,
            })
            .collect())
    }

    async fn client_stats(&self, client_id: i32) -> DomainResult<Option<ClientStats>> {
        let row = reading::Entity::find()
            .select_only()
            .column_as(Expr::col(reading::Column::ConsumKwh).sum(), "total")
            .column_as(Expr::col(reading::Column::ConsumKwh).max(), "max_kwh")
            .column_as(Expr::col(reading::Column::ConsumKwh).min(), "min_kwh")
            .column_as(Expr::col(reading::Column::Id).count(), "readings")
            .filter(reading::Column::ClientId.eq(client_id))
            .into_model::<StatsRow>()
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(row) = row.filter(|r| r.readings > 0) else {
            return Ok(None);
        };

        Ok(Some(ClientStats {
            average_kwh: row.total.unwrap_or(0.0) / row.readings as f64,
            max_kwh: row.max_kwh.unwrap_or(0.0),
            min_kwh: row.min_kwh.unwrap_or(0.0),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TOP_CONSUMERS_LIMIT;
    use crate::test_support::{date, memory_db, seed_reading};

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(date(start), date(end)).unwrap()
    }

    #[tokio::test]
    async fn summary_sums_and_averages_inclusive_range() {
        let db = memory_db().await;
        seed_reading(&db, 1, "ok", 10.0, "2024-01-01").await;
        seed_reading(&db, 2, "ok", 20.0, "2024-01-15").await;
        seed_reading(&db, 3, "ok", 30.0, "2024-01-31").await;
        seed_reading(&db, 3, "ok", 500.0, "2024-02-01").await;
        let repo = ReadingRepository::new(db);

        let summary = repo
            .period_summary(range("2024-01-01", "2024-01-31"))
            .await
            .unwrap();
        assert_eq!(summary.total_kwh, 60.0);
        assert_eq!(summary.average_kwh, Some(20.0));
        assert_eq!(summary.readings, 3);
    }

    #[tokio::test]
    async fn summary_of_empty_range_has_no_average() {
        let db = memory_db().await;
        seed_reading(&db, 1, "ok", 10.0, "2024-01-01").await;
        let repo = ReadingRepository::new(db);

        let summary = repo
            .period_summary(range("2025-01-01", "2025-12-31"))
            .await
            .unwrap();
        assert_eq!(summary.total_kwh, 0.0);
        assert_eq!(summary.average_kwh, None);
    }

    #[tokio::test]
    async fn top_consumers_sorted_desc_with_client_id_tiebreak() {
        let db = memory_db().await;
        // A=1: 50, B=2: 80, C=3: 10
        seed_reading(&db, 1, "ok", 20.0, "2024-01-01").await;
        seed_reading(&db, 1, "ok", 30.0, "2024-01-02").await;
        seed_reading(&db, 2, "ok", 80.0, "2024-01-03").await;
        seed_reading(&db, 3, "ok", 10.0, "2024-01-04").await;
        let repo = ReadingRepository::new(db);

        let top = repo
            .top_consumers(range("2024-01-01", "2024-01-31"), TOP_CONSUMERS_LIMIT)
            .await
            .unwrap();
        let pairs: Vec<_> = top.iter().map(|t| (t.client_id, t.total_kwh)).collect();
        assert_eq!(pairs, vec![(2, 80.0), (1, 50.0), (3, 10.0)]);
    }

    #[tokio::test]
    async fn top_consumers_caps_at_limit() {
        let db = memory_db().await;
        for client in 1..=7 {
            seed_reading(&db, client, "ok", 5.0, "2024-06-01").await;
        }
        seed_reading(&db, 7, "ok", 1.0, "2024-06-02").await;
        let repo = ReadingRepository::new(db);

        let top = repo
            .top_consumers(range("2024-06-01", "2024-06-30"), TOP_CONSUMERS_LIMIT)
            .await
            .unwrap();
        let ids: Vec<_> = top.iter().map(|t| t.client_id).collect();
        assert_eq!(ids, vec![7, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn faulty_meters_are_distinct() {
        let db = memory_db().await;
        seed_reading(&db, 4, "defect", 1.0, "2024-01-01").await;
        seed_reading(&db, 4, "defect", 1.0, "2024-01-02").await;
        seed_reading(&db, 4, "ok", 1.0, "2024-01-03").await;
        seed_reading(&db, 2, "defect", 1.0, "2024-01-01").await;
        seed_reading(&db, 9, "ok", 1.0, "2024-01-01").await;
        let repo = ReadingRepository::new(db);

        assert_eq!(repo.faulty_meter_clients().await.unwrap(), vec![2, 4]);
    }

    #[tokio::test]
    async fn update_overwrites_every_column() {
        let db = memory_db().await;
        let id = seed_reading(&db, 1, "ok", 10.0, "2024-01-01").await;
        let repo = ReadingRepository::new(db);

        let update = ReadingUpdate {
            client_id: 8,
            location: "Cluj".to_string(),
            meter_status: "defect".to_string(),
            client_type: "industrial".to_string(),
            consumption_kwh: 123.5,
            reading_date: date("2024-05-05"),
        };
        assert!(repo.update_reading(id, update.clone()).await.unwrap());

        let reloaded = repo
            .list_readings(Some(8))
            .await
            .unwrap()
            .pop()
            .unwrap();
        assert_eq!(reloaded.id, id);
        assert_eq!(reloaded.location, update.location);
        assert_eq!(reloaded.meter_status, update.meter_status);
        assert_eq!(reloaded.client_type, update.client_type);
        assert_eq!(reloaded.consumption_kwh, update.consumption_kwh);
        assert_eq!(reloaded.reading_date, update.reading_date);
        assert!(repo.list_readings(Some(1)).await.unwrap().is_empty());

        assert!(!repo.update_reading(id + 100, update).await.unwrap());
    }

    #[tokio::test]
    async fn client_series_and_stats() {
        let db = memory_db().await;
        seed_reading(&db, 5, "ok", 30.0, "2024-03-03").await;
        seed_reading(&db, 5, "ok", 10.0, "2024-03-01").await;
        seed_reading(&db, 5, "ok", 20.0, "2024-03-02").await;
        seed_reading(&db, 6, "ok", 99.0, "2024-03-01").await;
        let repo = ReadingRepository::new(db);

        let series = repo.client_time_series(5).await.unwrap();
        let values: Vec<_> = series.iter().map(|p| p.consumption_kwh).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);

        let stats = repo.client_stats(5).await.unwrap().unwrap();
        assert_eq!(stats.average_kwh, 20.0);
        assert_eq!(stats.max_kwh, 30.0);
        assert_eq!(stats.min_kwh, 10.0);

        assert!(repo.client_stats(404).await.unwrap().is_none());
        assert!(repo.first_reading_for_client(404).await.unwrap().is_none());
        assert_eq!(repo.list_readings(Some(5)).await.unwrap().len(), 3);
        assert_eq!(repo.list_readings(None).await.unwrap().len(), 4);
    }
}
