//! Display functions for CLI modes

use super::formatters::{attempts_meter, outcome_line};
use crate::commands::SimulationResult;
use crate::engine::{MemoryDump, PuzzleSession, SessionStatus};
use colored::Colorize;

/// Columns of dump rows printed side by side (the original renders its 32
/// addressed lines as a multi-column block)
const DUMP_COLUMNS: usize = 2;

/// Print the memory dump with its hex address column
///
/// Rows are folded into [`DUMP_COLUMNS`] columns, column-major like the
/// original: row `i` of column `c` holds dump row `i + lines * c`.
pub fn print_dump(dump: &MemoryDump, addresses: &[String]) {
    let rows = dump.rows();
    let lines = rows.len().div_ceil(DUMP_COLUMNS);

    for line in 0..lines {
        let mut rendered = String::new();
        for col in 0..DUMP_COLUMNS {
            let index = line + lines * col;
            if index >= rows.len() {
                continue;
            }
            let addr = addresses.get(index).map_or("0x????", String::as_str);
            rendered.push_str(&format!("{addr} {}    ", rows[index].text()));
        }
        println!("{}", rendered.trim_end().green());
    }
}

/// Print attempts and history below the dump
pub fn print_session_status(session: &PuzzleSession) {
    println!();
    println!(
        "{} {}",
        format!("[{}]", attempts_meter(session.attempts())).bright_green(),
        "ATTEMPTS REMAINING".green()
    );

    for record in session.history() {
        let line = outcome_line(record);
        match session.status() {
            SessionStatus::Won if line.ends_with("GRANTED") => {
                println!("{}", line.bright_yellow());
            }
            _ => println!("{}", line.green()),
        }
    }
    println!();
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.games);
    println!(
        "   Games won:        {} ({})",
        result.wins,
        format!("{:.1}%", result.win_rate * 100.0)
            .bright_yellow()
            .bold()
    );
    println!("   Average guesses:  {:.2}", result.average_guesses);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    println!("\n📈 {}", "Guesses used (won games):".bright_cyan().bold());
    for guesses in 1..=crate::engine::MAX_ATTEMPTS as usize {
        let count = result.guess_distribution.get(&guesses).copied().unwrap_or(0);
        let pct = if result.wins == 0 {
            0.0
        } else {
            (count as f64 / result.wins as f64) * 100.0
        };
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {guesses}: {bar} {count:4} ({pct:5.1}%)");
    }
}
