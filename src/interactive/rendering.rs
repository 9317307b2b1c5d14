//! TUI rendering with ratatui
//!
//! Green-on-black terminal look: hex-addressed dump grid on the left,
//! attempts/history/log on the right, difficulty menu and lock-out screens
//! as their own views.

use super::app::{App, MessageStyle, Screen};
use crate::engine::{Difficulty, SessionStatus};
use crate::output::formatters::{attempts_meter, outcome_line};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

/// Dump rows are folded into this many side-by-side columns
const DUMP_COLUMNS: usize = 2;

fn terminal_green() -> Style {
    Style::default().fg(Color::Green)
}

fn highlight() -> Style {
    Style::default().fg(Color::Black).bg(Color::Yellow)
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::DifficultyMenu => render_menu(f, app),
        Screen::Playing => render_playing(f, app),
        Screen::GameOver => render_game_over(f, app),
    }
}

fn render_menu(f: &mut Frame, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "TERMLINK PROTOCOL",
            terminal_green().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("SELECT DIFFICULTY:", terminal_green())),
        Line::from(""),
    ];

    for tier in Difficulty::ALL {
        let selected = tier == app.menu_choice;
        let text = format!(
            "{} {:<10} ({} LETTERS, {} ENTRIES)",
            if selected { ">" } else { " " },
            tier.label(),
            tier.word_length(),
            tier.candidate_count(),
        );
        let style = if selected {
            highlight()
        } else {
            terminal_green()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "UP/DOWN TO SELECT, ENTER TO BOOT, Q TO QUIT",
        terminal_green(),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(terminal_green()),
    );
    f.render_widget(paragraph, f.area());
}

fn render_playing(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Dump grid
            Constraint::Percentage(45), // Attempts / history / log
        ])
        .split(chunks[1]);

    render_dump(f, app, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);

    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = app.engine.session().map_or_else(
        || "TERMLINK PROTOCOL".to_string(),
        |s| format!("TERMLINK PROTOCOL :: {} MODE", s.difficulty().label()),
    );
    let header = Paragraph::new(title)
        .style(terminal_green().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(terminal_green()),
        );
    f.render_widget(header, area);
}

fn render_dump(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    if let Some(dump) = &app.dump {
        let rows = dump.rows();
        let per_column = rows.len().div_ceil(DUMP_COLUMNS);

        for line in 0..per_column {
            let mut spans = Vec::new();
            for col in 0..DUMP_COLUMNS {
                let index = line + per_column * col;
                if index >= rows.len() {
                    continue;
                }
                let addr = app
                    .addresses
                    .get(index)
                    .map_or("0x????", String::as_str);
                spans.push(Span::styled(
                    format!("{addr} "),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.extend(row_spans(app, index, rows[index].text()));
                spans.push(Span::raw("    "));
            }
            lines.push(Line::from(spans));
        }
    } else {
        lines.push(Line::from(Span::styled("NO DUMP LOADED", terminal_green())));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" MEMORY DUMP ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(terminal_green()),
    );
    f.render_widget(paragraph, area);
}

/// Split one row's text so the selected span renders highlighted
fn row_spans<'a>(app: &App, row: usize, text: &'a str) -> Vec<Span<'a>> {
    let selected = app
        .selected()
        .filter(|t| t.row == row)
        .map(|t| (t.start, t.end));

    match selected {
        Some((start, end)) => vec![
            Span::styled(text[..start].to_string(), terminal_green()),
            Span::styled(text[start..end].to_string(), highlight()),
            Span::styled(text[end..].to_string(), terminal_green()),
        ],
        None => vec![Span::styled(text, terminal_green())],
    }
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Attempts
            Constraint::Min(5),    // History
            Constraint::Length(7), // Messages
        ])
        .split(area);

    let attempts_line = app.engine.session().map_or_else(
        || Line::from("NO SESSION"),
        |s| {
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", attempts_meter(s.attempts())),
                    terminal_green().add_modifier(Modifier::BOLD),
                ),
                Span::styled("ATTEMPTS REMAINING", terminal_green()),
            ])
        },
    );
    let attempts = Paragraph::new(attempts_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(terminal_green()),
    );
    f.render_widget(attempts, chunks[0]);

    let history: Vec<ListItem> = app.engine.session().map_or_else(Vec::new, |s| {
        s.history()
            .iter()
            .map(|record| ListItem::new(Span::styled(outcome_line(record), terminal_green())))
            .collect()
    });
    let history_list = List::new(history).block(
        Block::default()
            .title(" LOG ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(terminal_green()),
    );
    f.render_widget(history_list, chunks[1]);

    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => terminal_green(),
                MessageStyle::Success => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(Span::styled(msg.text.clone(), style))
        })
        .collect();
    let message_list = List::new(messages).block(
        Block::default()
            .title(" CONSOLE ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(terminal_green()),
    );
    f.render_widget(message_list, chunks[2]);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.screen {
        Screen::DifficultyMenu => "UP/DOWN: select  ENTER: boot  Q: quit",
        Screen::Playing => "ARROWS/TAB: move cursor  ENTER: activate  N: reboot  Q: quit",
        Screen::GameOver => "N/ENTER: new terminal  Q: quit",
    };
    let status = Paragraph::new(hints)
        .style(terminal_green())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(terminal_green()),
        );
    f.render_widget(status, area);
}

fn render_game_over(f: &mut Frame, app: &App) {
    let won = app
        .engine
        .session()
        .is_some_and(|s| s.status() == SessionStatus::Won);

    let (banner, banner_style) = if won {
        (
            "ACCESS GRANTED",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "TERMINAL LOCKED",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(banner, banner_style)),
        Line::from(""),
    ];

    if let Some(session) = app.engine.session() {
        if !won {
            lines.push(Line::from(Span::styled(
                format!("PASSWORD WAS {}", session.password()),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::from(""));
        }
        for record in session.history() {
            lines.push(Line::from(Span::styled(
                outcome_line(record),
                terminal_green(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "N: NEW TERMINAL   Q: QUIT",
        terminal_green(),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(terminal_green()),
    );
    f.render_widget(paragraph, f.area());
}
