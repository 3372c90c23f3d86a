//! Shared fixtures for unit tests.

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use crate::infrastructure::database::entities::reading;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn memory_db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("YYYY-MM-DD")
}

/// Insert one reading and return its id.
pub async fn seed_reading(
    db: &DatabaseConnection,
    client_id: i32,
    status: &str,
    kwh: f64,
    day: &str,
) -> i32 {
    let model = reading::ActiveModel {
        id: NotSet,
        client_id: Set(client_id),
        locatie: Set(format!("Locatie {}", client_id)),
        status_contor: Set(status.to_string()),
        tip_client: Set("casnic".to_string()),
        consum_kwh: Set(kwh),
        data_citire: Set(date(day)),
    }
    .insert(db)
    .await
    .expect("insert reading");
    model.id
}
