//! Clients module: per-client details, time series and statistics

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
