//! Per-game configuration threaded through every engine call

use crate::core::Word;
use clap::ValueEnum;
use rustc_hash::FxHashSet;

/// When a finished game extends the current streak
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StreakPolicy {
    /// Every completed game counts, wins and losses alike
    #[default]
    EveryGame,
    /// Only wins count; a loss resets the streak to zero
    WinsOnly,
}

/// The target word, the accepted guesses and the streak rules for one game
#[derive(Debug, Clone)]
pub struct GameConfig {
    target: Word,
    accepted: FxHashSet<String>,
    streak_policy: StreakPolicy,
}

impl GameConfig {
    /// Build a configuration
    ///
    /// The target itself is always accepted as a guess.
    ///
    /// # Examples
    /// ```
    /// use wordle_daily::core::Word;
    /// use wordle_daily::game::GameConfig;
    ///
    /// let target = Word::new("hello").unwrap();
    /// let accepted = ["below", "fecal"].map(|w| Word::new(w).unwrap());
    /// let config = GameConfig::new(target, &accepted);
    ///
    /// assert!(config.accepts(&Word::new("hello").unwrap()));
    /// assert!(!config.accepts(&Word::new("mummy").unwrap()));
    /// ```
    #[must_use]
    pub fn new<'a>(target: Word, accepted: impl IntoIterator<Item = &'a Word>) -> Self {
        let mut accepted: FxHashSet<String> =
            accepted.into_iter().map(|w| w.text().to_string()).collect();
        accepted.insert(target.text().to_string());

        Self {
            target,
            accepted,
            streak_policy: StreakPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_streak_policy(mut self, policy: StreakPolicy) -> Self {
        self.streak_policy = policy;
        self
    }

    #[inline]
    #[must_use]
    pub const fn target(&self) -> &Word {
        &self.target
    }

    #[inline]
    #[must_use]
    pub const fn streak_policy(&self) -> StreakPolicy {
        self.streak_policy
    }

    /// Check whether a word may be submitted
    #[must_use]
    pub fn accepts(&self, word: &Word) -> bool {
        self.accepted.contains(word.text())
    }

    /// Number of distinct accepted guesses
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}
