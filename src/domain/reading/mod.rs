//! Reading aggregate
//!
//! Meter readings from `consum_energie` and the reports computed over them.

pub mod model;
pub mod repository;

pub use model::{
    ClientDetails, ClientStats, ClientTotal, ConsumptionPoint, DateRange, PeriodSummary, Reading,
    ReadingUpdate, TOP_CONSUMERS_LIMIT,
};

pub use repository::ReadingRepositoryInterface;
