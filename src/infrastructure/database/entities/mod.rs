//! Database entities module

pub mod reading;
pub mod user;

pub use reading::Entity as Reading;
pub use user::Entity as User;
