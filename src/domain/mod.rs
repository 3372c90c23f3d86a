//! Domain layer: entities, report shapes, repository traits and errors.

pub mod error;
pub mod reading;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use reading::{
    ClientDetails, ClientStats, ClientTotal, ConsumptionPoint, DateRange, PeriodSummary, Reading,
    ReadingRepositoryInterface, ReadingUpdate, TOP_CONSUMERS_LIMIT,
};
pub use user::{CreateUserDto, User, UserRepositoryInterface, UserRole};
