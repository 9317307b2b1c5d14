//! Simple interactive CLI mode
//!
//! Text-based play loop without the TUI: the dump is printed with its address
//! column and the player types candidate words (or a bracket pair to cash in
//! a bonus token).

use crate::catalog::Catalog;
use crate::engine::{
    DEFAULT_NOISE_ALPHABET, DEFAULT_ROW_WIDTH, DEFAULT_ROWS, Difficulty, EngineError,
    GuessOutcome, MemoryDump, PuzzleEngine, SessionStatus, TokenEffect,
};
use crate::output::display::{print_dump, print_session_status};
use crate::output::formatters::DEFAULT_ADDRESS_BASE;
use crate::output::hex_addresses;
use colored::Colorize;
use std::io::{self, Write};

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input or the catalog
/// cannot supply a puzzle at the requested difficulty.
#[allow(clippy::too_many_lines)] // Interactive game loop requires detailed handling
pub fn run_simple(difficulty: Difficulty, seed: Option<u64>) -> Result<(), String> {
    let catalog = Catalog::builtin();
    let mut engine = match seed {
        Some(seed) => PuzzleEngine::with_seed(catalog, seed),
        None => PuzzleEngine::new(catalog),
    };

    println!("{}", "TERMLINK PROTOCOL".bright_green().bold());
    println!("{}", "INITIALIZING BOOT SEQUENCE... OK".green());
    println!("{}", "CHECKING MEMORY ARRAYS... OK".green());
    println!();
    println!("Type a candidate word to guess the password.");
    println!("Type a bracket pair shown in the dump (e.g. '[]') to cash in a bonus token.");
    println!("Commands: 'quit' to exit, 'new' for a fresh terminal.\n");

    let addresses = hex_addresses(DEFAULT_ROWS, DEFAULT_ADDRESS_BASE);

    'game: loop {
        engine
            .start_session(difficulty)
            .map_err(|e| e.to_string())?;
        let mut dump = regenerate(&mut engine)?;

        println!(
            "{}",
            format!("PASSWORD REQUIRED :: {} MODE", difficulty.label()).bright_green()
        );

        loop {
            print_dump(&dump, &addresses);
            if let Some(session) = engine.session() {
                print_session_status(session);
            }

            let input = get_user_input(">")?;
            match input.to_lowercase().as_str() {
                "quit" | "q" | "exit" => {
                    println!("\n{}", "TERMLINK SESSION CLOSED".green());
                    return Ok(());
                }
                "new" | "n" => {
                    println!("\n{}", "> REINITIALIZING TERMINAL".green());
                    continue 'game;
                }
                _ => {}
            }

            if let Some(effect) = try_token(&mut engine, &dump, &input) {
                match effect {
                    TokenEffect::DudRemoved(word) => {
                        println!("\n{}", format!("> DUD REMOVED :: {word}").bright_yellow());
                    }
                    TokenEffect::AttemptsRestored => {
                        println!("\n{}", "> TRIES RESET".bright_yellow());
                    }
                }
                // Tokens are ephemeral; a redraw clears and re-rolls them
                dump = regenerate(&mut engine)?;
                continue;
            }

            match engine.guess(&input) {
                Ok(GuessOutcome::Correct) => {
                    print_banner("ACCESS GRANTED", true);
                    if !play_again()? {
                        return Ok(());
                    }
                    continue 'game;
                }
                Ok(GuessOutcome::Likeness(score)) => {
                    println!(
                        "\n{}",
                        format!("> ACCESS DENIED :: LIKENESS={score}").red()
                    );
                    let lost = engine
                        .session()
                        .is_some_and(|s| s.status() == SessionStatus::Lost);
                    if lost {
                        print_banner("TERMINAL LOCKED", false);
                        if let Some(session) = engine.session() {
                            println!(
                                "{}",
                                format!("> PASSWORD WAS {}", session.password()).red()
                            );
                        }
                        if !play_again()? {
                            return Ok(());
                        }
                        continue 'game;
                    }
                }
                Err(EngineError::InvalidGuess) => {
                    println!("\n{}", "> INVALID ENTRY".red());
                }
                Err(e) => {
                    println!("\n{}", format!("> ERROR :: {e}").red());
                }
            }
        }
    }
}

fn regenerate(engine: &mut PuzzleEngine) -> Result<MemoryDump, String> {
    engine
        .generate_dump(DEFAULT_ROWS, DEFAULT_ROW_WIDTH, DEFAULT_NOISE_ALPHABET)
        .map_err(|e| e.to_string())
}

/// Activate a bonus token if the input names a pair present in the dump
fn try_token(
    engine: &mut PuzzleEngine,
    dump: &MemoryDump,
    input: &str,
) -> Option<TokenEffect> {
    let matched = dump.rows().iter().any(|row| {
        row.token_span()
            .is_some_and(|t| format!("{}{}", t.pair.open(), t.pair.close()) == input)
    });
    if !matched {
        return None;
    }
    engine.activate_token().ok()
}

fn print_banner(text: &str, success: bool) {
    let line = "═".repeat(40);
    let styled = if success {
        text.bright_green().bold()
    } else {
        text.red().bold()
    };
    println!("\n{}", line.green());
    println!("    {styled}");
    println!("{}\n", line.green());
}

fn play_again() -> Result<bool, String> {
    let answer = get_user_input("Play again? (yes/no)")?.to_lowercase();
    Ok(matches!(answer.as_str(), "yes" | "y"))
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String, String> {
    print!("{prompt} ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    Ok(input.trim().to_string())
}
