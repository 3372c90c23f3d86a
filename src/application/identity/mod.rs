//! Identity module: user management & authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: login, registration, default admin bootstrap, role changes.

pub mod service;

pub use service::{AuthPolicy, Registration, UserService, MISSING_FIELDS_MESSAGE};
