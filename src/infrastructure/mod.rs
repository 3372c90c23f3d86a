//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod server;
pub mod session;

pub use database::{init_database, DatabaseConfig};
