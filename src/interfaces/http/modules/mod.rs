pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod pages;
pub mod readings;
pub mod request_id;
pub mod users;
