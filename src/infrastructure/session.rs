//! Session persistence
//!
//! Sessions live in the application database so that expired rows can be
//! purged and a restart does not log everyone out.

use tokio::task::JoinHandle;
use tokio::time::Duration;
use tower_sessions::session_store::ExpiredDeletion;
use tracing::{debug, info, warn};

use crate::infrastructure::server::ShutdownSignal;

/// Delete expired sessions every `check_interval_secs` until shutdown.
///
/// The first purge runs immediately.
pub fn start_session_cleanup_task<S>(
    store: S,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) -> JoinHandle<()>
where
    S: ExpiredDeletion,
{
    tokio::spawn(async move {
        info!(check_interval = check_interval_secs, "Session cleanup task started");

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match store.delete_expired().await {
                        Ok(()) => debug!("Expired sessions purged"),
                        Err(e) => warn!(error = %e, "Session cleanup error"),
                    }
                }
                _ = shutdown.wait() => break,
            }
        }

        info!("Session cleanup task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
    use std::collections::HashMap;
    use time::OffsetDateTime;
    use tower_sessions::session::{Id, Record};
    use tower_sessions::SessionStore;
    use tower_sessions_sqlx_store::SqliteStore;

    use crate::test_support::memory_db;

    async fn stored_sessions(db: &DatabaseConnection) -> i64 {
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM tower_sessions",
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get("", "n").unwrap()
    }

    fn record(expiry_date: OffsetDateTime) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date,
        }
    }

    #[tokio::test]
    async fn expired_sessions_are_purged_and_live_ones_kept() {
        let db = memory_db().await;
        let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
        store.migrate().await.unwrap();

        let now = OffsetDateTime::now_utc();
        store
            .save(&record(now - time::Duration::hours(1)))
            .await
            .unwrap();
        let live = record(now + time::Duration::hours(1));
        store.save(&live).await.unwrap();
        assert_eq!(stored_sessions(&db).await, 2);

        let shutdown = ShutdownSignal::new();
        let task = start_session_cleanup_task(store.clone(), shutdown.clone(), 3600);
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        assert_eq!(stored_sessions(&db).await, 1);
        assert!(store.load(&live.id).await.unwrap().is_some());

        shutdown.trigger();
        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
