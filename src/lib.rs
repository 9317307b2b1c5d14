//! Termlink
//!
//! A retro terminal-hacking word puzzle. A memory dump full of noise hides a
//! set of candidate words; one is the password. Each wrong guess reports its
//! likeness (positionally matching characters) and costs an attempt; bracket
//! pair tokens hidden in the noise remove duds or restore attempts.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use termlink::catalog::Catalog;
//! use termlink::engine::{Difficulty, PuzzleEngine};
//!
//! let mut engine = PuzzleEngine::with_seed(Catalog::builtin(), 42);
//! let session = engine.start_session(Difficulty::Novice).unwrap();
//! println!("{} candidates in play", session.candidates().len());
//! ```

// Core domain types
pub mod core;

// Word catalog
pub mod catalog;

// Puzzle engine
pub mod engine;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
