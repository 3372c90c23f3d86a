//! Reporting module: readings queries, aggregates and in-place updates

pub mod service;

pub use service::{parse_date_range, ReportingService, DATE_FORMAT};
