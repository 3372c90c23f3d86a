//! Process lifecycle support

pub mod shutdown;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
