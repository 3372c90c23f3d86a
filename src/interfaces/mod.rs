//! Interface layer - HTTP API and pages

pub mod http;
