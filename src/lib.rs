//! Wordle Daily
//!
//! A daily five-letter word game: duplicate-aware letter scoring, a guess
//! session state machine, and statistics (streaks, win rate, guess
//! distribution) persisted between runs.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_daily::core::{Verdict, Word, score};
//!
//! let guess = Word::new("hello").unwrap();
//! let target = Word::new("below").unwrap();
//!
//! let row = score(&guess, &target);
//! assert_eq!(Verdict::row_to_emoji(&row), "⬜🟩🟩⬜🟨");
//! ```

// Core domain types and scoring
pub mod core;

// Session state machine and statistics engine
pub mod game;

// Persisted records
pub mod storage;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
