//! Server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database init, migrations,
//! default admin, HTTP router, and graceful shutdown.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend};
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::{MySqlStore, SqliteStore};
use tracing::{error, info, warn};

use crate::application::UserService;
use crate::config::AppConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::UserRepository;
use crate::infrastructure::server::ShutdownCoordinator;
use crate::infrastructure::init_database;
use crate::interfaces::http::modules::pages::Templates;
use crate::interfaces::http::{create_router, AppState, SessionSettings};
use crate::infrastructure::session::start_session_cleanup_task;

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin when `userweb` is empty (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running dashboard server.
///
/// ```rust,no_run
/// use energy_dashboard::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub config: AppConfig,
    /// Port actually bound (differs from config when it was 0).
    pub port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
    cleanup_task: JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting energy dashboard...");

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Services ───────────────────────────────────────────
        let user_service = Arc::new(UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            app_cfg.auth_policy(),
        )?);

        if opts.create_default_admin {
            let admin = &app_cfg.admin;
            match user_service
                .ensure_default_admin(&admin.username, &admin.email, &admin.password)
                .await
            {
                Ok(true) => warn!(
                    username = %admin.username,
                    "Default admin created; change its password"
                ),
                Ok(false) => {}
                Err(e) => error!("Failed to create default admin: {}", e),
            }
        }

        let templates = Templates::new()?;

        // ── HTTP server ────────────────────────────────────────
        let state = AppState::new(db.clone(), user_service, templates);

        let addr = app_cfg.server.address();
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();
        info!("Dashboard listening on http://{}", addr);
        info!(
            "OpenAPI document at http://{}/api-doc/openapi.json",
            addr
        );

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let session = app_cfg.session_settings();
        let cleanup_every = app_cfg.security.session_cleanup_interval_secs;

        // ── Session store ──────────────────────────────────────
        let (api_task, cleanup_task) = match db.get_database_backend() {
            DbBackend::Sqlite => {
                let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
                store.migrate().await?;
                spawn_http(listener, state, &session, store, &shutdown, cleanup_every)
            }
            DbBackend::MySql => {
                let store = MySqlStore::new(db.get_mysql_connection_pool().clone());
                store.migrate().await?;
                spawn_http(listener, state, &session, store, &shutdown, cleanup_every)
            }
            other => return Err(format!("no session store for {:?}", other).into()),
        };

        Ok(Self {
            config: app_cfg,
            port,
            db,
            shutdown,
            api_task,
            cleanup_task,
        })
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Block until the server has stopped, then close the pool.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds after the
    /// signal before the server task is abandoned.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            cleanup_task,
            ..
        } = self;

        let joined = shutdown
            .drain(async {
                match (&mut api_task).await {
                    Ok(()) => info!("HTTP server stopped"),
                    Err(e) => error!("HTTP server task panicked: {}", e),
                }
            })
            .await;
        if !joined {
            api_task.abort();
        }
        cleanup_task.abort();
        let _ = cleanup_task.await;

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }
}

/// Serve `router` on `listener` and start purging expired sessions.
fn spawn_http<S>(
    listener: TcpListener,
    state: AppState,
    session: &SessionSettings,
    store: S,
    shutdown: &ShutdownCoordinator,
    cleanup_every: u64,
) -> (JoinHandle<()>, JoinHandle<()>)
where
    S: ExpiredDeletion + Clone,
{
    let cleanup_task = start_session_cleanup_task(store.clone(), shutdown.signal(), cleanup_every);
    let router = create_router(state, session, store);

    let api_shutdown = shutdown.signal();
    let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("HTTP server received shutdown signal");
    });

    let api_task = tokio::spawn(async move {
        if let Err(e) = api_server.await {
            error!("HTTP server error: {}", e);
        }
    });

    (api_task, cleanup_task)
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once per process.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 1;
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 1;
        config.security.bcrypt_cost = 4;
        ServerOptions {
            config,
            ..ServerOptions::default()
        }
    }

    #[tokio::test]
    async fn starts_serves_and_stops() {
        std::env::remove_var(crate::config::DATABASE_URL_ENV);
        let handle = ServerHandle::start(test_options()).await.unwrap();
        assert_ne!(handle.port, 0);

        let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", handle.port))
            .await
            .unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200"), "{raw}");

        use sea_orm::{ConnectionTrait, Statement};
        let sessions = handle
            .db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM tower_sessions",
            ))
            .await;
        assert!(sessions.is_ok(), "session table missing: {sessions:?}");

        handle.trigger_shutdown();
        handle.wait().await;
    }
}
