//! Keyboard summary: the best verdict seen so far for each guessed letter

use super::{ScoreRow, Verdict, Word, score};
use std::collections::BTreeMap;

/// Best verdict per letter across all submitted guesses
///
/// Letters that were never guessed have no entry, so callers can tell
/// "unknown" apart from "known absent". Entries only ever upgrade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    letters: BTreeMap<u8, Verdict>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scored guess into the summary
    pub fn record(&mut self, guess: &Word, row: &ScoreRow) {
        for (&letter, &verdict) in guess.chars().iter().zip(row) {
            self.letters
                .entry(letter)
                .and_modify(|best| *best = (*best).max(verdict))
                .or_insert(verdict);
        }
    }

    /// Best verdict for a letter, if it has been guessed
    #[must_use]
    pub fn get(&self, letter: char) -> Option<Verdict> {
        u8::try_from(letter.to_ascii_lowercase())
            .ok()
            .and_then(|b| self.letters.get(&b).copied())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Iterate letters in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        self.letters.iter().map(|(&b, &v)| (char::from(b), v))
    }
}

/// Build the keyboard summary for a series of guesses against `target`
///
/// Each guess is scored as a whole, so duplicate-letter rules apply exactly as
/// they do on the board.
#[must_use]
pub fn aggregate<'a>(guesses: impl IntoIterator<Item = &'a Word>, target: &Word) -> KeyboardState {
    let mut keyboard = KeyboardState::new();
    for guess in guesses {
        keyboard.record(guess, &score(guess, target));
    }
    keyboard
}
