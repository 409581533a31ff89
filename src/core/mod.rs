//! Core domain types for the word game
//!
//! Words, per-letter verdicts and the keyboard summary. Everything here is pure:
//! no I/O, no clocks, no ambient state.

mod keyboard;
mod verdict;
mod word;

pub use keyboard::{KeyboardState, aggregate};
pub use verdict::{Verdict, score, score_letters};
pub use word::{Word, WordError};

/// Number of letters in every guess and target
pub const WORD_LENGTH: usize = 5;

/// Number of rows on the board
pub const MAX_GUESSES: usize = 6;

/// Verdicts for one submitted row, aligned with its letters
pub type ScoreRow = [Verdict; WORD_LENGTH];
