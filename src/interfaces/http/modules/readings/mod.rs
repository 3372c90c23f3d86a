//! Readings module: list and full-row update of `consum_energie`

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
