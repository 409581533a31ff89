//! TUI rendering with ratatui
//!
//! Board, on-screen keyboard, toasts and the statistics panel.

use super::app::App;
use super::toast::MessageStyle;
use crate::core::{KeyboardState, MAX_GUESSES, Verdict, WORD_LENGTH};
use crate::game::Status;
use crate::output::{create_progress_bar, format_countdown, until_next_puzzle};
use crate::storage::KeyValueStore;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Main UI rendering function
pub fn ui<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                          // Header
            Constraint::Length(MAX_GUESSES as u16 * 2 + 1), // Board
            Constraint::Length(5),                          // Keyboard
            Constraint::Min(3),                             // Toasts
            Constraint::Length(3),                          // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_board(f, app, chunks[1]);
    render_keyboard(f, &app.game.keyboard(), chunks[2]);
    render_toasts(f, app, chunks[3]);
    render_status(f, app, chunks[4]);

    if app.show_stats {
        render_statistics(f, app, f.area());
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("WORDLE")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn verdict_style(verdict: Verdict) -> Style {
    let bg = match verdict {
        Verdict::Correct => Color::Green,
        Verdict::Present => Color::Yellow,
        Verdict::Absent => Color::DarkGray,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn render_board<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let session = app.game.session();
    let mut lines = Vec::with_capacity(MAX_GUESSES * 2);

    for (row, (text, scores)) in session.board().iter().zip(session.scores()).enumerate() {
        let letters: Vec<char> = text.chars().collect();
        let mut spans = Vec::with_capacity(WORD_LENGTH * 2);

        for col in 0..WORD_LENGTH {
            let cell = match (letters.get(col), scores) {
                (Some(c), Some(verdicts)) => Span::styled(
                    format!(" {} ", c.to_ascii_uppercase()),
                    verdict_style(verdicts[col]),
                ),
                (Some(c), None) => Span::styled(
                    format!(" {} ", c.to_ascii_uppercase()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                (None, _) if row == session.active_row() && col == letters.len() => {
                    Span::styled(" _ ", Style::default().fg(Color::Gray))
                }
                (None, _) => Span::styled(" · ", Style::default().fg(Color::DarkGray)),
            };
            spans.push(cell);
            spans.push(Span::raw(" "));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, keyboard: &KeyboardState, area: Rect) {
    let mut lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| {
                    let style = keyboard
                        .get(c)
                        .map_or_else(|| Style::default().fg(Color::White), verdict_style);
                    [
                        Span::styled(format!(" {} ", c.to_ascii_uppercase()), style),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    if let Some(last) = lines.last_mut() {
        let enter = Span::styled("ENTER ", Style::default().fg(Color::Cyan));
        last.spans.insert(0, enter);
        last.spans.push(Span::styled("⌫", Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(paragraph, area);
}

fn render_toasts<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .toasts
        .iter()
        .map(|toast| {
            let style = match toast.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(Line::from(toast.text.clone()).alignment(Alignment::Center))
                .style(style.add_modifier(Modifier::BOLD))
        })
        .collect();

    f.render_widget(List::new(items), area);
}

fn render_status<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let (state, color) = match app.game.session().status() {
        Status::InProgress => (
            format!("Guess {}/{MAX_GUESSES}", app.game.session().active_row() + 1),
            Color::White,
        ),
        Status::Win => ("Solved".to_string(), Color::Green),
        Status::Lose => ("Out of guesses".to_string(), Color::Red),
    };
    let state = Paragraph::new(state)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(state, chunks[0]);

    let help_text = "Enter: Submit | ⌫: Delete | Tab: Stats | Ctrl-N: New Board | Esc: Quit";
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[1]);
}

/// Centered rectangle of the given size, clipped to `area`
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_statistics<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    const BAR_WIDTH: usize = 20;

    let stats = app.game.statistics();
    let session = app.game.session();
    let distribution = stats.guess_distribution();
    let max = f64::from(distribution.max_bucket().max(1));

    // Today's winning row is highlighted
    let today = (session.status() == Status::Win).then(|| session.guesses_made());

    let mut lines = vec![
        Line::from(Span::styled(
            "STATISTICS",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(format!(
            "Played {}   Win % {}   Current Streak {}   Max Streak {}",
            stats.games_played(),
            stats.win_percentage(),
            stats.current_streak(),
            stats.max_streak()
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "GUESS DISTRIBUTION",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    for (guesses, wins) in distribution.iter() {
        let color = if today == Some(guesses) {
            Color::Green
        } else {
            Color::Gray
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{guesses} ")),
            Span::styled(
                create_progress_bar(f64::from(wins), max, BAR_WIDTH),
                Style::default().fg(color),
            ),
            Span::raw(format!(" {wins}")),
        ]));
    }
    lines.push(Line::from(vec![
        Span::raw("X "),
        Span::styled(
            create_progress_bar(f64::from(distribution.fails()), max, BAR_WIDTH),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!(" {}", distribution.fails())),
    ]));

    if session.status().is_terminal() {
        let remaining = until_next_puzzle(chrono::Local::now().naive_local());
        lines.push(Line::from(""));
        lines.push(
            Line::from(format!("Next word in {}", format_countdown(remaining)))
                .alignment(Alignment::Center),
        );
    }

    let popup = centered(64, lines.len() as u16 + 2, area);
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics | Tab to close ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(panel, popup);
}
