//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_dump, print_session_status, print_simulation_result};
pub use formatters::{attempts_meter, hex_addresses, outcome_line};
