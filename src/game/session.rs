//! Guess session state machine
//!
//! A session owns the board, the score matrix, the active row pointer and the
//! terminal status. Only the active row is mutable, and only while the session
//! is in progress. `InProgress -> Win | Lose` is one-way.

use super::{GameConfig, GuessError};
use crate::core::{
    KeyboardState, MAX_GUESSES, ScoreRow, Verdict, WORD_LENGTH, Word, aggregate, score,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    InProgress,
    Win,
    Lose,
}

impl Status {
    /// Win or Lose
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Solved on guess number `guesses` (1-based)
    Won { guesses: usize },
    Lost,
}

/// Terminal output of a session, consumed by the statistics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedGame {
    pub outcome: Outcome,
    pub completed_at: DateTime<Utc>,
    /// Completion time of the game before this one, if any
    pub previous_completion: Option<DateTime<Utc>>,
}

/// Result of an accepted submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Row scored, play continues on the next row
    Advanced { verdicts: ScoreRow },
    /// Row scored and the session reached Win or Lose
    Finished {
        verdicts: ScoreRow,
        game: FinishedGame,
    },
}

impl Submission {
    #[must_use]
    pub const fn verdicts(&self) -> &ScoreRow {
        match self {
            Self::Advanced { verdicts } | Self::Finished { verdicts, .. } => verdicts,
        }
    }

    #[must_use]
    pub const fn finished(&self) -> Option<&FinishedGame> {
        match self {
            Self::Advanced { .. } => None,
            Self::Finished { game, .. } => Some(game),
        }
    }
}

/// One day's board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    active_row: usize,
    board_state: [String; MAX_GUESSES],
    scores: [Option<ScoreRow>; MAX_GUESSES],
    status: Status,
    #[serde(rename = "lastCompletedTs", with = "chrono::serde::ts_milliseconds_option")]
    last_completed: Option<DateTime<Utc>>,
    #[serde(rename = "lastPlayedTs", with = "chrono::serde::ts_milliseconds_option")]
    last_played: Option<DateTime<Utc>>,
    target: Option<String>,
}

/// Individually decoded fields of a stored session
///
/// Any field may be missing; [`Session::restore`] fills the gaps and checks
/// that the pieces agree with each other.
#[derive(Debug, Clone, Default)]
pub struct SessionParts {
    pub active_row: Option<usize>,
    pub board: Option<[String; MAX_GUESSES]>,
    pub scores: Option<[Option<ScoreRow>; MAX_GUESSES]>,
    pub status: Option<Status>,
    pub last_completed: Option<DateTime<Utc>>,
    pub last_played: Option<DateTime<Utc>>,
    pub target: Option<String>,
}

impl Session {
    /// Fresh board for `target`
    #[must_use]
    pub fn new(target: &Word) -> Self {
        Self {
            target: Some(target.text().to_string()),
            ..Self::default()
        }
    }

    /// Rebuild a session from stored parts
    ///
    /// Timestamps and the target are taken as given. Board progress (rows,
    /// scores, active row and status) is kept only if it is internally
    /// consistent; otherwise the board starts fresh.
    #[must_use]
    pub fn restore(parts: SessionParts) -> Self {
        let mut session = Self {
            last_completed: parts.last_completed,
            last_played: parts.last_played,
            target: parts.target,
            ..Self::default()
        };

        let board = parts.board.unwrap_or_default();
        let scores = parts.scores.unwrap_or_default();
        let status = parts.status.unwrap_or_default();
        let scored = scores.iter().take_while(|s| s.is_some()).count();
        let active_row = parts.active_row.unwrap_or(if status.is_terminal() {
            scored.saturating_sub(1)
        } else {
            scored
        });

        match check_progress(&board, &scores, status, active_row) {
            Ok(()) => {
                session.board_state = board;
                session.scores = scores;
                session.status = status;
                session.active_row = active_row;
            }
            Err(reason) => {
                log::warn!("Discarding stored board progress: {reason}");
            }
        }

        session
    }

    /// Append a letter to the active row
    ///
    /// Returns `false` (and changes nothing) if the session is over, the row is
    /// full, or `letter` is not an ASCII letter.
    pub fn add_letter(&mut self, letter: char) -> bool {
        if self.status.is_terminal() || !letter.is_ascii_alphabetic() {
            return false;
        }

        let row = &mut self.board_state[self.active_row];
        if row.len() >= WORD_LENGTH {
            return false;
        }

        row.push(letter.to_ascii_lowercase());
        true
    }

    /// Remove the last letter of the active row
    ///
    /// Returns `false` if the session is over or the row is empty.
    pub fn delete_letter(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.board_state[self.active_row].pop().is_some()
    }

    /// Submit the active row
    ///
    /// Validation order: game over, incomplete row, unknown word. A rejected
    /// submit never mutates the session. An accepted one writes the score row,
    /// then checks for a win before checking for the last row, so a correct
    /// final guess is a win.
    ///
    /// # Errors
    /// Returns `GuessError` if the session is over, the row is short, or the
    /// word is not accepted by `config`.
    pub fn submit(
        &mut self,
        config: &GameConfig,
        now: DateTime<Utc>,
    ) -> Result<Submission, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::GameOver);
        }

        let row = &self.board_state[self.active_row];
        if row.len() < WORD_LENGTH {
            return Err(GuessError::IncompleteGuess);
        }

        let guess = Word::new(row.as_str()).map_err(|_| GuessError::UnknownWord(row.clone()))?;
        if !config.accepts(&guess) {
            return Err(GuessError::UnknownWord(row.clone()));
        }

        let verdicts = score(&guess, config.target());
        self.scores[self.active_row] = Some(verdicts);
        self.last_played = Some(now);

        let submission = if Verdict::is_win(&verdicts) {
            self.finish(Status::Win, verdicts, now)
        } else if self.active_row == MAX_GUESSES - 1 {
            self.finish(Status::Lose, verdicts, now)
        } else {
            self.active_row += 1;
            Submission::Advanced { verdicts }
        };

        log::debug!(
            "Submitted '{}' on row {}: {} ({:?})",
            guess,
            self.guesses_made(),
            Verdict::row_to_emoji(&verdicts),
            self.status
        );

        Ok(submission)
    }

    fn finish(&mut self, status: Status, verdicts: ScoreRow, now: DateTime<Utc>) -> Submission {
        self.status = status;
        let previous_completion = self.last_completed.replace(now);
        let outcome = match status {
            Status::Win => Outcome::Won {
                guesses: self.guesses_made(),
            },
            _ => Outcome::Lost,
        };

        Submission::Finished {
            verdicts,
            game: FinishedGame {
                outcome,
                completed_at: now,
                previous_completion,
            },
        }
    }

    /// Clear the board for a new game
    ///
    /// Keeps both timestamps so streak continuity survives a manual reset.
    pub fn reset(&mut self, target: &Word) {
        *self = Self {
            last_completed: self.last_completed,
            last_played: self.last_played,
            ..Self::new(target)
        };
    }

    /// Keyboard summary of the submitted rows against `target`
    #[must_use]
    pub fn keyboard(&self, target: &Word) -> KeyboardState {
        let guesses: Vec<Word> = self
            .submitted()
            .filter_map(|(text, _)| Word::new(text).ok())
            .collect();
        aggregate(&guesses, target)
    }

    /// Submitted rows with their verdicts, top to bottom
    pub fn submitted(&self) -> impl Iterator<Item = (&str, &ScoreRow)> {
        self.board_state
            .iter()
            .zip(&self.scores)
            .filter_map(|(row, s)| s.as_ref().map(|s| (row.as_str(), s)))
    }

    /// Number of non-empty rows that have been scored
    #[must_use]
    pub fn guesses_made(&self) -> usize {
        self.board_state
            .iter()
            .zip(&self.scores)
            .filter(|(row, s)| !row.is_empty() && s.is_some())
            .count()
    }

    #[inline]
    #[must_use]
    pub const fn active_row(&self) -> usize {
        self.active_row
    }

    #[inline]
    #[must_use]
    pub const fn board(&self) -> &[String; MAX_GUESSES] {
        &self.board_state
    }

    #[inline]
    #[must_use]
    pub const fn scores(&self) -> &[Option<ScoreRow>; MAX_GUESSES] {
        &self.scores
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[inline]
    #[must_use]
    pub const fn last_completed(&self) -> Option<DateTime<Utc>> {
        self.last_completed
    }

    #[inline]
    #[must_use]
    pub const fn last_played(&self) -> Option<DateTime<Utc>> {
        self.last_played
    }

    /// Target word this board was played against
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Letters typed into the active row so far
    #[must_use]
    pub fn current_row(&self) -> &str {
        &self.board_state[self.active_row]
    }
}

fn check_progress(
    board: &[String; MAX_GUESSES],
    scores: &[Option<ScoreRow>; MAX_GUESSES],
    status: Status,
    active_row: usize,
) -> Result<(), String> {
    if active_row >= MAX_GUESSES {
        return Err(format!("active row {active_row} out of range"));
    }

    for (i, (row, s)) in board.iter().zip(scores).enumerate() {
        if row.len() > WORD_LENGTH || !row.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(format!("row {i} is not a partial word"));
        }

        let submitted = i < active_row || (i == active_row && status.is_terminal());
        if submitted && (row.len() != WORD_LENGTH || s.is_none()) {
            return Err(format!("row {i} should be a scored word"));
        }
        if !submitted && s.is_some() {
            return Err(format!("row {i} is scored but not submitted"));
        }
        if i > active_row && !row.is_empty() {
            return Err(format!("row {i} is past the active row"));
        }
    }

    let last_win = scores[active_row].as_ref().is_some_and(Verdict::is_win);
    let earlier_win = scores[..active_row].iter().flatten().any(Verdict::is_win);
    if earlier_win {
        return Err("a win before the active row".to_string());
    }
    match status {
        Status::Win if !last_win => Err("win without a winning row".to_string()),
        Status::Lose if last_win || active_row != MAX_GUESSES - 1 => {
            Err("loss before the board was full".to_string())
        }
        _ => Ok(()),
    }
}
