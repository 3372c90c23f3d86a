//! HTTP interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `middleware`: cookie-session authentication and role guards
//! - `modules`: handlers grouped by resource, plus server-rendered pages
//! - `router`: route table, layers and OpenAPI document

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_router, ApiDoc, AppState, SessionSettings};
