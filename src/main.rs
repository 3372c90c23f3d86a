//! Energy dashboard server
//!
//! ```sh
//! # Run with default config (~/.config/energy-dashboard/config.toml)
//! energy-dashboard
//!
//! # Custom config path
//! energy-dashboard --config /etc/energy-dashboard/config.toml
//!
//! # Override the port
//! energy-dashboard --port 8080
//!
//! # Validate config without starting
//! energy-dashboard --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use energy_dashboard::config::AppConfig;
use energy_dashboard::server::{init_tracing, ServerHandle, ServerOptions};

/// Role-gated dashboard over energy consumption readings.
#[derive(Parser, Debug)]
#[command(
    name = "energy-dashboard",
    version,
    about = "Energy consumption dashboard",
    long_about = "HTTP server with a JSON API and server-rendered pages over \
                  energy consumption readings.\n\n\
                  Default config: ~/.config/energy-dashboard/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ENERGY_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(energy_dashboard::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            if cli.check {
                return Err(e.into());
            }
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.display_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Session TTL : {} min", config.security.session_ttl_minutes);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
