//! TUI application state and logic

use super::toast::{MessageStyle, Toasts};
use crate::game::{Game, GuessError, Outcome};
use crate::output::game_over_message;
use crate::storage::{KeyValueStore, Records};
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Delay between the end of a game and the statistics panel appearing
pub const STATS_REVEAL_DELAY: Duration = Duration::from_millis(2100);

/// How often the event loop wakes up to expire toasts
const TICK: Duration = Duration::from_millis(100);

/// Application state
pub struct App<S> {
    pub game: Game,
    records: Records<S>,
    pub toasts: Toasts,
    pub stats_reveal_at: Option<Instant>,
    pub show_stats: bool,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    #[must_use]
    pub fn new(game: Game, records: Records<S>) -> Self {
        // A finished board from earlier today opens straight onto the statistics
        let show_stats = game.session().status().is_terminal();

        Self {
            game,
            records,
            toasts: Toasts::default(),
            stats_reveal_at: None,
            show_stats,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_board(now),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.show_stats = !self.show_stats,
            KeyCode::Char(c) if !ctrl => {
                self.game.add_letter(c);
            }
            KeyCode::Backspace => {
                self.game.delete_letter();
            }
            KeyCode::Enter => self.submit(now),
            _ => {}
        }
    }

    pub fn submit(&mut self, now: Instant) {
        match self.game.submit(Utc::now()) {
            Ok(submission) => {
                if let Err(e) = self.records.save_after_submit(&self.game, &submission) {
                    log::warn!("Could not save progress: {e}");
                    self.toasts
                        .push("Could not save progress", MessageStyle::Error, now);
                }

                if let Some(finished) = submission.finished() {
                    let style = match finished.outcome {
                        Outcome::Won { .. } => MessageStyle::Success,
                        Outcome::Lost => MessageStyle::Info,
                    };
                    let message = game_over_message(finished.outcome, self.game.config().target());
                    self.toasts.push(message, style, now);
                    self.stats_reveal_at = Some(now + STATS_REVEAL_DELAY);
                }
            }
            // Input after the game ends is ignored
            Err(GuessError::GameOver) => {}
            Err(e) => self.toasts.push(e.to_string(), MessageStyle::Error, now),
        }
    }

    /// Reset the board, cancelling any pending toasts and the statistics reveal
    pub fn new_board(&mut self, now: Instant) {
        self.game.reset();
        self.toasts.clear();
        self.stats_reveal_at = None;
        self.show_stats = false;

        if let Err(e) = self.records.save_session(self.game.session()) {
            log::warn!("Could not save reset board: {e}");
            self.toasts
                .push("Could not save progress", MessageStyle::Error, now);
        } else {
            self.toasts.push("New board", MessageStyle::Info, now);
        }
    }

    /// Advance timers: expire toasts and reveal statistics when due
    pub fn tick(&mut self, now: Instant) {
        self.toasts.prune(now);

        if self.stats_reveal_at.is_some_and(|at| now >= at) {
            self.stats_reveal_at = None;
            self.show_stats = true;
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: KeyValueStore>(app: App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B, S>(terminal: &mut Terminal<B>, mut app: App<S>) -> Result<()>
where
    B: ratatui::backend::Backend,
    S: KeyValueStore,
{
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
