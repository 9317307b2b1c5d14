//! TUI application state and logic
//!
//! The TUI is a thin shell around the engine: it keeps derived, disposable
//! hit-test targets for the current dump and routes key presses into engine
//! commands. Cursor selection over embedded spans stands in for the
//! original's mouse hit-testing against rendered text.

use crate::catalog::Catalog;
use crate::core::Word;
use crate::engine::{
    DEFAULT_NOISE_ALPHABET, DEFAULT_ROW_WIDTH, DEFAULT_ROWS, Difficulty, GuessOutcome,
    MemoryDump, PuzzleEngine, SessionStatus, TokenEffect,
};
use crate::output::formatters::DEFAULT_ADDRESS_BASE;
use crate::output::hex_addresses;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Which screen the player is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    DifficultyMenu,
    Playing,
    GameOver,
}

/// What a selectable dump region resolves to
#[derive(Debug, Clone)]
pub enum TargetKind {
    Word(Word),
    Token,
}

/// A selectable region of the dump, in logical row/offset coordinates
#[derive(Debug, Clone)]
pub struct Target {
    pub row: usize,
    pub start: usize,
    pub end: usize,
    pub kind: TargetKind,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub engine: PuzzleEngine,
    pub screen: Screen,
    pub menu_choice: Difficulty,
    pub dump: Option<MemoryDump>,
    pub addresses: Vec<String>,
    pub targets: Vec<Target>,
    pub cursor: usize,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let catalog = Catalog::builtin();
        let engine = match seed {
            Some(seed) => PuzzleEngine::with_seed(catalog, seed),
            None => PuzzleEngine::new(catalog),
        };

        Self {
            engine,
            screen: Screen::DifficultyMenu,
            menu_choice: Difficulty::default(),
            dump: None,
            addresses: hex_addresses(DEFAULT_ROWS, DEFAULT_ADDRESS_BASE),
            targets: Vec::new(),
            cursor: 0,
            messages: vec![Message {
                text: "WELCOME TO TERMLINK".to_string(),
                style: MessageStyle::Info,
            }],
            should_quit: false,
        }
    }

    /// Start a session at the menu's difficulty and enter the playing screen
    pub fn start_game(&mut self) {
        match self.engine.start_session(self.menu_choice) {
            Ok(_) => {
                self.screen = Screen::Playing;
                self.messages.clear();
                self.add_message("PASSWORD REQUIRED", MessageStyle::Info);
                self.refresh_dump();
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Drop the session and return to the difficulty menu
    pub fn back_to_menu(&mut self) {
        self.engine.reset();
        self.dump = None;
        self.targets.clear();
        self.cursor = 0;
        self.screen = Screen::DifficultyMenu;
    }

    /// Regenerate the dump and rebuild hit-test targets
    ///
    /// Called after any candidate-set change; the old dump and its targets
    /// are stale the moment the engine mutates.
    pub fn refresh_dump(&mut self) {
        match self
            .engine
            .generate_dump(DEFAULT_ROWS, DEFAULT_ROW_WIDTH, DEFAULT_NOISE_ALPHABET)
        {
            Ok(dump) => {
                self.targets = build_targets(&dump);
                self.dump = Some(dump);
                self.cursor = 0;
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Currently selected target, if any
    #[must_use]
    pub fn selected(&self) -> Option<&Target> {
        self.targets.get(self.cursor)
    }

    pub fn select_next(&mut self) {
        if !self.targets.is_empty() {
            self.cursor = (self.cursor + 1) % self.targets.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.targets.is_empty() {
            self.cursor = (self.cursor + self.targets.len() - 1) % self.targets.len();
        }
    }

    /// Resolve the selected target into an engine command
    pub fn activate_selected(&mut self) {
        let Some(target) = self.targets.get(self.cursor).cloned() else {
            return;
        };

        match target.kind {
            TargetKind::Word(word) => self.guess_word(&word),
            TargetKind::Token => self.cash_in_token(),
        }
    }

    fn guess_word(&mut self, word: &Word) {
        match self.engine.guess(word.text()) {
            Ok(GuessOutcome::Correct) => {
                self.add_message("ACCESS GRANTED", MessageStyle::Success);
                self.screen = Screen::GameOver;
            }
            Ok(GuessOutcome::Likeness(score)) => {
                self.add_message(
                    &format!("ENTRY DENIED. LIKENESS={score}"),
                    MessageStyle::Error,
                );
                let lost = self
                    .engine
                    .session()
                    .is_some_and(|s| s.status() == SessionStatus::Lost);
                if lost {
                    self.add_message("TERMINAL LOCKED", MessageStyle::Error);
                    self.screen = Screen::GameOver;
                }
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn cash_in_token(&mut self) {
        match self.engine.activate_token() {
            Ok(TokenEffect::DudRemoved(word)) => {
                self.add_message(&format!("DUD REMOVED :: {word}"), MessageStyle::Success);
            }
            Ok(TokenEffect::AttemptsRestored) => {
                self.add_message("TRIES RESET", MessageStyle::Success);
            }
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        }
        // Candidate set or attempts changed; the dump and its tokens are stale
        self.refresh_dump();
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Flatten a dump's spans into selectable targets, row-major
fn build_targets(dump: &MemoryDump) -> Vec<Target> {
    let mut targets = Vec::new();
    for (row, dump_row) in dump.rows().iter().enumerate() {
        for span in dump_row.word_spans() {
            targets.push(Target {
                row,
                start: span.start,
                end: span.end,
                kind: TargetKind::Word(span.word.clone()),
            });
        }
        if let Some(token) = dump_row.token_span() {
            targets.push(Target {
                row,
                start: token.start,
                end: token.end,
                kind: TargetKind::Token,
            });
        }
    }
    targets.sort_by_key(|t| (t.row, t.start));
    targets
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.should_quit = true;
            }

            match app.screen {
                Screen::DifficultyMenu => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Up => app.menu_choice = app.menu_choice.cycle_prev(),
                    KeyCode::Down => app.menu_choice = app.menu_choice.cycle_next(),
                    KeyCode::Enter => app.start_game(),
                    _ => {}
                },
                Screen::Playing => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Char('n') => app.back_to_menu(),
                    KeyCode::Left | KeyCode::Up => app.select_prev(),
                    KeyCode::Right | KeyCode::Down | KeyCode::Tab => app.select_next(),
                    KeyCode::Enter => app.activate_selected(),
                    _ => {}
                },
                Screen::GameOver => match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Char('n') | KeyCode::Enter => app.back_to_menu(),
                    _ => {}
                },
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
