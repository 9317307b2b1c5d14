//! Command implementations

pub mod preview;
pub mod simple;
pub mod simulate;

pub use preview::run_preview;
pub use simple::run_simple;
pub use simulate::{SimulationResult, run_simulation};
