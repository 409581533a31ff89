//! Game engine: session state machine plus statistics
//!
//! [`Game`] keeps the session and the statistics together so every transition
//! is one read-modify-write of a single value. Hosts that share a game between
//! threads wrap the whole `Game` in one lock.

mod config;
mod error;
mod session;
mod statistics;

pub use config::{GameConfig, StreakPolicy};
pub use error::GuessError;
pub use session::{FinishedGame, Outcome, Session, SessionParts, Status, Submission};
pub use statistics::{
    FAIL_KEY, GuessDistribution, STREAK_WINDOW_HOURS, Statistics, win_percentage,
};

use crate::core::KeyboardState;
use chrono::{DateTime, Utc};

/// A day's session, the long-lived statistics and the configuration they run under
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    session: Session,
    statistics: Statistics,
}

impl Game {
    /// Assemble a game from loaded state
    ///
    /// If the session was played against a different target (a new day, or a
    /// record from before targets were stored), it is reset for the configured
    /// target. The previous completion time survives the reset.
    #[must_use]
    pub fn new(config: GameConfig, mut session: Session, statistics: Statistics) -> Self {
        if session.target() != Some(config.target().text()) {
            if session.target().is_some() {
                log::info!("Target word changed, starting a new board");
            }
            session.reset(config.target());
        }

        Self {
            config,
            session,
            statistics,
        }
    }

    pub fn add_letter(&mut self, letter: char) -> bool {
        self.session.add_letter(letter)
    }

    pub fn delete_letter(&mut self) -> bool {
        self.session.delete_letter()
    }

    /// Submit the active row, updating statistics if the game just ended
    ///
    /// # Errors
    /// Returns `GuessError` when the row is rejected; nothing changes in that case.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<Submission, GuessError> {
        let submission = self.session.submit(&self.config, now)?;

        if let Some(game) = submission.finished() {
            self.statistics = self
                .statistics
                .update(game, self.config.streak_policy());
            log::debug!(
                "Game finished: {:?}, streak {} (max {}), played {}",
                game.outcome,
                self.statistics.current_streak(),
                self.statistics.max_streak(),
                self.statistics.games_played()
            );
        }

        Ok(submission)
    }

    /// Start the board over; statistics and the last completion time are kept
    pub fn reset(&mut self) {
        self.session.reset(self.config.target());
    }

    #[must_use]
    pub fn keyboard(&self) -> KeyboardState {
        self.session.keyboard(self.config.target())
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use chrono::{Duration, TimeZone};

    fn config(target: &str) -> GameConfig {
        let accepted: Vec<Word> = ["hello", "below", "fecal", "growl", "melts", "share", "wrong"]
            .iter()
            .map(|w| Word::new(*w).unwrap())
            .collect();
        GameConfig::new(Word::new(target).unwrap(), &accepted)
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn enter(game: &mut Game, word: &str, now: DateTime<Utc>) -> Result<Submission, GuessError> {
        for c in word.chars() {
            game.add_letter(c);
        }
        game.submit(now)
    }

    #[test]
    fn statistics_update_once_per_finished_game() {
        let mut game = Game::new(config("hello"), Session::default(), Statistics::default());

        enter(&mut game, "below", start()).unwrap();
        assert_eq!(game.statistics().games_played(), 0);

        enter(&mut game, "hello", start()).unwrap();
        assert_eq!(game.statistics().games_played(), 1);
        assert_eq!(game.statistics().guess_distribution().wins_in(2), 1);

        // Further submits are rejected and do not count again
        assert_eq!(game.submit(start()), Err(GuessError::GameOver));
        assert_eq!(game.statistics().games_played(), 1);
    }

    #[test]
    fn reset_preserves_statistics_and_completion() {
        let mut game = Game::new(config("hello"), Session::default(), Statistics::default());
        enter(&mut game, "hello", start()).unwrap();
        let stats = *game.statistics();

        game.reset();
        assert_eq!(game.statistics(), &stats);
        assert_eq!(game.session().last_completed(), Some(start()));
        assert_eq!(game.session().status(), Status::InProgress);
        assert_eq!(game.session().active_row(), 0);
        assert!(game.keyboard().is_empty());
    }

    #[test]
    fn next_day_continues_streak() {
        let mut first = Game::new(config("hello"), Session::default(), Statistics::default());
        enter(&mut first, "hello", start()).unwrap();

        let mut second = Game::new(config("below"), first.session().clone(), *first.statistics());
        assert_eq!(second.session().active_row(), 0);
        assert_eq!(second.session().target(), Some("below"));

        enter(&mut second, "below", start() + Duration::hours(23)).unwrap();
        assert_eq!(second.statistics().current_streak(), 2);
        assert_eq!(second.statistics().games_played(), 2);
    }

    #[test]
    fn same_target_keeps_progress() {
        let mut game = Game::new(config("hello"), Session::default(), Statistics::default());
        enter(&mut game, "below", start()).unwrap();

        let resumed = Game::new(config("hello"), game.session().clone(), *game.statistics());
        assert_eq!(resumed.session().active_row(), 1);
        assert_eq!(resumed.keyboard().get('b'), Some(crate::core::Verdict::Absent));
    }
}
