//! Statistics engine: streaks, win rate and the guess distribution

use super::StreakPolicy;
use super::session::{FinishedGame, Outcome};
use crate::core::MAX_GUESSES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gap between completions after which a streak is broken
pub const STREAK_WINDOW_HOURS: f64 = 24.0;

/// Key of the failure bucket in the stored distribution
pub const FAIL_KEY: &str = "fail";

/// Histogram of wins by guess number, plus a failure bucket
///
/// Stored as a JSON object keyed `"1"`..`"6"` and `"fail"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, u32>", from = "BTreeMap<String, u32>")]
pub struct GuessDistribution {
    wins: [u32; MAX_GUESSES],
    fail: u32,
}

impl GuessDistribution {
    /// Wins on guess number `guesses` (1-based); 0 outside the board
    #[must_use]
    pub fn wins_in(&self, guesses: usize) -> u32 {
        guesses
            .checked_sub(1)
            .and_then(|i| self.wins.get(i))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub const fn fails(&self) -> u32 {
        self.fail
    }

    /// Sum of all numeric buckets
    #[must_use]
    pub fn games_won(&self) -> u32 {
        self.wins.iter().sum()
    }

    /// Sum of every bucket, failures included
    #[must_use]
    pub fn total(&self) -> u32 {
        self.games_won() + self.fail
    }

    /// Largest bucket, for scaling bar charts
    #[must_use]
    pub fn max_bucket(&self) -> u32 {
        self.wins.iter().copied().chain([self.fail]).max().unwrap_or(0)
    }

    /// `(guess number, wins)` for every row of the board
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.wins.iter().enumerate().map(|(i, &n)| (i + 1, n))
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won { guesses } => {
                let bucket = guesses.clamp(1, MAX_GUESSES) - 1;
                self.wins[bucket] += 1;
            }
            Outcome::Lost => self.fail += 1,
        }
    }
}

impl From<GuessDistribution> for BTreeMap<String, u32> {
    fn from(dist: GuessDistribution) -> Self {
        dist.iter()
            .map(|(guesses, n)| (guesses.to_string(), n))
            .chain([(FAIL_KEY.to_string(), dist.fail)])
            .collect()
    }
}

impl From<BTreeMap<String, u32>> for GuessDistribution {
    fn from(map: BTreeMap<String, u32>) -> Self {
        let mut dist = Self::default();
        for (key, count) in map {
            if key == FAIL_KEY {
                dist.fail = count;
            } else if let Some(slot) = key
                .parse::<usize>()
                .ok()
                .and_then(|g| g.checked_sub(1))
                .and_then(|i| dist.wins.get_mut(i))
            {
                *slot = count;
            } else {
                log::debug!("Ignoring unknown distribution bucket '{key}'");
            }
        }
        dist
    }
}

/// Long-lived play statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    current_streak: u32,
    max_streak: u32,
    games_played: u32,
    win_percentage: u32,
    guess_distribution: GuessDistribution,
}

impl Statistics {
    /// Rebuild statistics from stored values
    ///
    /// The distribution is the source of truth: `games_played` and
    /// `win_percentage` are recomputed from it, and `max_streak` is raised to
    /// at least `current_streak`.
    #[must_use]
    pub fn restore(
        current_streak: u32,
        max_streak: u32,
        games_played: u32,
        guess_distribution: GuessDistribution,
    ) -> Self {
        let total = guess_distribution.total();
        if games_played != total {
            log::debug!(
                "Stored gamesPlayed {games_played} disagrees with distribution total {total}"
            );
        }

        Self {
            current_streak,
            max_streak: max_streak.max(current_streak),
            games_played: total,
            win_percentage: win_percentage(total, guess_distribution.games_won()),
            guess_distribution,
        }
    }

    /// Fold one finished game into the statistics
    ///
    /// The streak continues if the previous completion was at most
    /// [`STREAK_WINDOW_HOURS`] before this one, otherwise it restarts; either
    /// way the finished game itself counts, so a broken streak becomes 1. Under
    /// [`StreakPolicy::WinsOnly`] a loss sets the streak to 0 instead.
    #[must_use]
    pub fn update(&self, game: &FinishedGame, policy: StreakPolicy) -> Self {
        let continues = game.previous_completion.is_some_and(|previous| {
            let hours = (game.completed_at - previous).num_seconds() as f64 / 3600.0;
            hours <= STREAK_WINDOW_HOURS
        });

        let current_streak = match (policy, game.outcome) {
            (StreakPolicy::WinsOnly, Outcome::Lost) => 0,
            _ if continues => self.current_streak + 1,
            _ => 1,
        };

        let mut guess_distribution = self.guess_distribution;
        guess_distribution.record(game.outcome);

        let games_played = self.games_played + 1;

        Self {
            current_streak,
            max_streak: self.max_streak.max(current_streak),
            games_played,
            win_percentage: win_percentage(games_played, guess_distribution.games_won()),
            guess_distribution,
        }
    }

    #[must_use]
    pub const fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub const fn max_streak(&self) -> u32 {
        self.max_streak
    }

    #[must_use]
    pub const fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub const fn win_percentage(&self) -> u32 {
        self.win_percentage
    }

    #[must_use]
    pub const fn guess_distribution(&self) -> &GuessDistribution {
        &self.guess_distribution
    }
}

/// Rounded percentage of games won; 0 when nothing has been played
///
/// # Examples
/// ```
/// use wordle_daily::game::win_percentage;
///
/// assert_eq!(win_percentage(0, 0), 0);
/// assert_eq!(win_percentage(15, 14), 93);
/// ```
#[must_use]
pub fn win_percentage(played: u32, won: u32) -> u32 {
    if played == 0 {
        return 0;
    }
    (100.0 * f64::from(won) / f64::from(played)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::hours(hours)
    }

    fn finished(outcome: Outcome, previous: Option<i64>, completed: i64) -> FinishedGame {
        FinishedGame {
            outcome,
            completed_at: at(completed),
            previous_completion: previous.map(at),
        }
    }

    fn win(guesses: usize) -> Outcome {
        Outcome::Won { guesses }
    }

    #[test]
    fn first_win() {
        let stats =
            Statistics::default().update(&finished(win(2), None, 0), StreakPolicy::EveryGame);

        assert_eq!(stats.current_streak(), 1);
        assert_eq!(stats.max_streak(), 1);
        assert_eq!(stats.games_played(), 1);
        assert_eq!(stats.win_percentage(), 100);
        assert_eq!(stats.guess_distribution().wins_in(2), 1);
        assert_eq!(stats.guess_distribution().fails(), 0);
    }

    #[test]
    fn first_loss() {
        let game = finished(Outcome::Lost, None, 0);
        let stats = Statistics::default().update(&game, StreakPolicy::EveryGame);

        assert_eq!(stats.current_streak(), 1);
        assert_eq!(stats.games_played(), 1);
        assert_eq!(stats.win_percentage(), 0);
        assert_eq!(stats.guess_distribution().fails(), 1);
        assert_eq!(stats.guess_distribution().wins_in(6), 0);
    }

    #[test]
    fn win_on_sixth_guess() {
        let stats =
            Statistics::default().update(&finished(win(6), None, 0), StreakPolicy::EveryGame);
        assert_eq!(stats.guess_distribution().wins_in(6), 1);
        assert_eq!(stats.win_percentage(), 100);
    }

    #[test]
    fn streak_continues_within_window() {
        let policy = StreakPolicy::EveryGame;
        let stats = Statistics::default()
            .update(&finished(win(3), None, 0), policy)
            .update(&finished(win(4), Some(0), 20), policy)
            .update(&finished(Outcome::Lost, Some(20), 44), policy);

        assert_eq!(stats.current_streak(), 3);
        assert_eq!(stats.max_streak(), 3);
    }

    #[test]
    fn streak_resets_to_one_after_gap() {
        let policy = StreakPolicy::EveryGame;
        let stats = Statistics::default()
            .update(&finished(win(3), None, 0), policy)
            .update(&finished(win(3), Some(0), 10), policy)
            .update(&finished(win(2), Some(10), 59), policy);

        assert_eq!(stats.current_streak(), 1);
        assert_eq!(stats.max_streak(), 2);
    }

    #[test]
    fn exactly_twenty_four_hours_continues() {
        let stats = Statistics::restore(3, 5, 0, GuessDistribution::default())
            .update(&finished(win(1), Some(0), 24), StreakPolicy::EveryGame);
        assert_eq!(stats.current_streak(), 4);
        assert_eq!(stats.max_streak(), 5);
    }

    #[test]
    fn max_streak_follows_current() {
        let stats = Statistics::restore(7, 5, 0, GuessDistribution::default())
            .update(&finished(win(1), Some(0), 1), StreakPolicy::EveryGame);
        assert_eq!(stats.current_streak(), 8);
        assert_eq!(stats.max_streak(), 8);
    }

    #[test]
    fn wins_only_policy_breaks_on_loss() {
        let policy = StreakPolicy::WinsOnly;
        let stats = Statistics::default()
            .update(&finished(win(3), None, 0), policy)
            .update(&finished(Outcome::Lost, Some(0), 5), policy);
        assert_eq!(stats.current_streak(), 0);
        assert_eq!(stats.max_streak(), 1);

        let stats = stats.update(&finished(win(2), Some(5), 10), policy);
        assert_eq!(stats.current_streak(), 1);
    }

    #[test]
    fn distribution_sums_to_games_played() {
        let outcomes = [win(1), Outcome::Lost, win(4), win(4), Outcome::Lost, win(6), win(2)];
        let mut stats = Statistics::default();
        for (n, outcome) in outcomes.iter().enumerate() {
            let hour = n as i64 * 30;
            let game = finished(*outcome, Some(hour - 30), hour);
            stats = stats.update(&game, StreakPolicy::EveryGame);
        }

        assert_eq!(stats.games_played(), 7);
        assert_eq!(stats.guess_distribution().total(), 7);
        assert_eq!(stats.guess_distribution().games_won(), 5);
        assert_eq!(stats.win_percentage(), 71);
        assert_eq!(stats.current_streak(), 1);
    }

    #[test]
    fn win_percentage_rounds() {
        assert_eq!(win_percentage(0, 0), 0);
        assert_eq!(win_percentage(15, 14), 93);
        assert_eq!(win_percentage(3, 2), 67);
        assert_eq!(win_percentage(8, 1), 13);
    }

    #[test]
    fn games_won_excludes_failures() {
        let mut map = BTreeMap::new();
        for (key, n) in [("1", 1), ("2", 1), ("3", 1), ("4", 1), ("5", 1), ("fail", 5)] {
            map.insert(key.to_string(), n);
        }
        let dist = GuessDistribution::from(map);
        assert_eq!(dist.games_won(), 5);
        assert_eq!(dist.total(), 10);
        assert_eq!(dist.max_bucket(), 5);
    }

    #[test]
    fn restore_reconciles_with_distribution() {
        let mut map = BTreeMap::new();
        map.insert("2".to_string(), 3);
        map.insert("fail".to_string(), 1);
        let stats = Statistics::restore(4, 2, 99, GuessDistribution::from(map));

        assert_eq!(stats.games_played(), 4);
        assert_eq!(stats.win_percentage(), 75);
        assert_eq!(stats.max_streak(), 4);
    }

    #[test]
    fn distribution_json_shape() {
        let stats =
            Statistics::default().update(&finished(win(2), None, 0), StreakPolicy::EveryGame);
        let value = serde_json::to_value(stats).unwrap();

        assert_eq!(value["gamesPlayed"], 1);
        assert_eq!(value["winPercentage"], 100);
        assert_eq!(value["guessDistribution"]["2"], 1);
        assert_eq!(value["guessDistribution"]["6"], 0);
        assert_eq!(value["guessDistribution"]["fail"], 0);

        let dist: GuessDistribution =
            serde_json::from_value(value["guessDistribution"].clone()).unwrap();
        assert_eq!(&dist, stats.guess_distribution());
    }
}
