//! Core domain types for the terminal-hacking puzzle
//!
//! This module contains the fundamental domain types with zero external dependencies.
//! All types here are pure, testable, and have clear mathematical properties.

mod likeness;
mod word;

pub use likeness::likeness;
pub use word::{PAD_CHAR, Word, WordError};
