//! Puzzle engine: difficulty mapping, session lifecycle, memory dump generation
//!
//! The engine is a plain state machine with no rendering dependency. The
//! presentation layer issues commands (`start_session`, `guess`, token
//! activation) and renders the snapshots and dumps the engine hands back.

mod difficulty;
mod dump;
mod session;

pub use difficulty::Difficulty;
pub use dump::{
    BracketPair, DEFAULT_NOISE_ALPHABET, DEFAULT_ROW_WIDTH, DEFAULT_ROWS, DumpRow, MemoryDump,
    TokenSpan, WordSpan,
};
pub use session::{
    EngineError, GuessOutcome, GuessRecord, MAX_ATTEMPTS, PuzzleEngine, PuzzleSession,
    SessionStatus, TokenEffect,
};
