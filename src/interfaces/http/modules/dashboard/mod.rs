//! Dashboard module: period summary, top consumers, faulty meters

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
