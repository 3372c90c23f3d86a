//! Authentication module: login and registration forms, logout, session status

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
