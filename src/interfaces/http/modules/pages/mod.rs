//! Pages module: server-rendered HTML views

pub mod handlers;
pub mod templates;

pub use handlers::*;
pub use templates::{PageError, PageResult, Templates};
