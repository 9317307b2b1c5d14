//! Termlink - CLI
//!
//! Retro terminal-hacking word puzzle with TUI and plain CLI modes.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use termlink::{
    commands::{run_preview, run_simple, run_simulation},
    engine::{DEFAULT_ROW_WIDTH, DEFAULT_ROWS, Difficulty},
    output::print_simulation_result,
};

#[derive(Parser)]
#[command(
    name = "termlink",
    about = "Retro terminal-hacking word puzzle: crack the password from a noisy memory dump",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Difficulty: novice (default), advanced, expert, master
    #[arg(short, long, global = true, default_value = "novice")]
    difficulty: String,

    /// Seed the session RNG for reproducible puzzles
    #[arg(short, long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (typed guesses, no TUI)
    Simple,

    /// Generate and print one memory dump without playing
    Preview {
        /// Number of dump rows
        #[arg(short, long, default_value_t = DEFAULT_ROWS)]
        rows: usize,

        /// Characters per row
        #[arg(short, long, default_value_t = DEFAULT_ROW_WIDTH)]
        width: usize,

        /// Also print the candidate list and password
        #[arg(long)]
        reveal: bool,
    },

    /// Autoplay many games with a likeness-filtering bot and report stats
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "200")]
        games: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(difficulty) = Difficulty::from_name(&cli.difficulty) else {
        bail!(
            "Unknown difficulty '{}'; expected one of: novice, advanced, expert, master",
            cli.difficulty
        );
    };

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(cli.seed),
        Commands::Simple => run_simple(difficulty, cli.seed).map_err(|e| anyhow::anyhow!(e)),
        Commands::Preview {
            rows,
            width,
            reveal,
        } => run_preview(difficulty, rows, width, cli.seed, reveal)
            .map_err(|e| anyhow::anyhow!(e)),
        Commands::Simulate { games } => {
            let result = run_simulation(difficulty, games, cli.seed.unwrap_or(0));
            print_simulation_result(&result);
            Ok(())
        }
    }
}

fn run_play_command(seed: Option<u64>) -> Result<()> {
    use termlink::interactive::{App, run_tui};

    let app = App::new(seed);
    run_tui(app)
}
