//! Preview command
//!
//! Generates one memory dump and prints it without starting an interactive
//! game. Useful for eyeballing placement behavior and tuning dump shapes.

use crate::catalog::Catalog;
use crate::engine::{DEFAULT_NOISE_ALPHABET, Difficulty, PuzzleEngine};
use crate::output::display::print_dump;
use crate::output::formatters::DEFAULT_ADDRESS_BASE;
use crate::output::hex_addresses;
use colored::Colorize;

/// Generate and print one dump at the given difficulty and shape
///
/// With `reveal`, the candidate list and password are printed below the dump.
///
/// # Errors
///
/// Returns an error if the catalog cannot supply a puzzle or the requested
/// shape cannot hold the session's words.
pub fn run_preview(
    difficulty: Difficulty,
    rows: usize,
    width: usize,
    seed: Option<u64>,
    reveal: bool,
) -> Result<(), String> {
    let catalog = Catalog::builtin();
    let mut engine = match seed {
        Some(seed) => PuzzleEngine::with_seed(catalog, seed),
        None => PuzzleEngine::new(catalog),
    };

    engine
        .start_session(difficulty)
        .map_err(|e| e.to_string())?;
    let dump = engine
        .generate_dump(rows, width, DEFAULT_NOISE_ALPHABET)
        .map_err(|e| e.to_string())?;

    println!(
        "{}",
        format!("MEMORY DUMP :: {} MODE :: {rows}x{width}", difficulty.label()).bright_green()
    );
    let addresses = hex_addresses(rows, DEFAULT_ADDRESS_BASE);
    print_dump(&dump, &addresses);

    println!(
        "\n{}",
        format!("{} bonus token(s) survived placement", dump.token_count()).green()
    );

    if reveal {
        // Session is guaranteed live right after start_session
        if let Some(session) = engine.session() {
            let candidates: Vec<&str> =
                session.candidates().iter().map(|w| w.text()).collect();
            println!("{}", format!("Candidates: {}", candidates.join(" ")).green());
            println!(
                "{}",
                format!("Password:   {}", session.password()).bright_yellow()
            );
        }
    }

    Ok(())
}
