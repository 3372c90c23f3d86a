pub mod identity;
pub mod reporting;

pub use identity::{AuthPolicy, Registration, UserService};
pub use reporting::ReportingService;
