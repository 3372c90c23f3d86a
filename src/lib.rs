//! # Energy Dashboard
//!
//! Role-gated dashboard over energy consumption readings: a JSON API and
//! server-rendered pages behind a cookie session.
//!
//! ## Architecture
//!
//! - **domain**: readings, users, roles and repository traits
//! - **application**: identity and reporting services
//! - **infrastructure**: SeaORM database, password hashing, shutdown
//! - **interfaces**: HTTP API, pages and middleware
//! - **server**: process bootstrap and lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;

#[cfg(test)]
mod test_support;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::{create_router, AppState};
