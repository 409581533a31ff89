//! Errors produced by submitting a guess

use thiserror::Error;

/// Why a submitted row was rejected
///
/// Every variant leaves the session untouched; the front end shows the message
/// as a transient toast and keeps accepting input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// The active row has fewer letters than a word
    #[error("Not enough letters")]
    IncompleteGuess,

    /// The active row is not in the accepted word list
    #[error("Not in word list")]
    UnknownWord(String),

    /// The session already ended in a win or a loss
    #[error("The game is over")]
    GameOver,
}
