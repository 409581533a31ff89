//! Per-letter verdicts and the scoring engine
//!
//! A verdict classifies one letter of a guess against the target:
//! - `Absent` = letter not in the target (or its budget already used)
//! - `Present` = letter in the target, wrong position
//! - `Correct` = letter in the correct position
//!
//! Verdicts are ordered `Absent < Present < Correct`, which is the order the
//! keyboard summary upgrades through.

use super::{ScoreRow, WORD_LENGTH, Word, WordError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Absent,
    Present,
    Correct,
}

impl Verdict {
    /// Emoji square for this verdict
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Single ASCII symbol for this verdict (`G`, `Y` or `-`)
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    /// Check if every verdict in a row is `Correct`
    #[must_use]
    pub fn is_win(row: &ScoreRow) -> bool {
        row.iter().all(|&v| v == Self::Correct)
    }

    /// Render a whole row as emoji squares
    #[must_use]
    pub fn row_to_emoji(row: &ScoreRow) -> String {
        row.iter().map(|v| v.emoji()).collect()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        };
        f.write_str(name)
    }
}

/// Score `guess` against `target`
///
/// Duplicate letters are resolved per letter by walking the guess's occurrences
/// from the rightmost to the leftmost:
/// 1. An occurrence on one of the target's positions is `Correct` and marks the
///    letter as seen. Any outstanding `Present` for that letter drops to `Absent`.
/// 2. Otherwise, once the letter has been seen, the occurrence is `Absent`.
/// 3. Otherwise it becomes the single outstanding `Present`, and the previous
///    one (further right) drops to `Absent`.
///
/// Letters missing from the target are `Absent` everywhere. The number of
/// `Correct` plus `Present` verdicts for a letter never exceeds its count in the
/// target.
///
/// # Examples
/// ```
/// use wordle_daily::core::{Verdict, Word, score};
///
/// let guess = Word::new("hello").unwrap();
/// let target = Word::new("below").unwrap();
///
/// assert_eq!(
///     score(&guess, &target),
///     [
///         Verdict::Absent,
///         Verdict::Correct,
///         Verdict::Correct,
///         Verdict::Absent,
///         Verdict::Present,
///     ]
/// );
/// ```
#[must_use]
pub fn score(guess: &Word, target: &Word) -> ScoreRow {
    let mut row = [Verdict::Absent; WORD_LENGTH];

    for (letter, guess_positions) in guess.letter_positions() {
        let target_positions = target.positions_of(letter);
        if target_positions.is_empty() {
            continue;
        }

        let mut seen = false;
        let mut present: Option<usize> = None;

        for &pos in guess_positions.iter().rev() {
            if target_positions.contains(&pos) {
                row[pos] = Verdict::Correct;
                seen = true;
                if let Some(earlier) = present.take() {
                    row[earlier] = Verdict::Absent;
                }
            } else if seen {
                row[pos] = Verdict::Absent;
            } else {
                if let Some(earlier) = present.replace(pos) {
                    row[earlier] = Verdict::Absent;
                }
                row[pos] = Verdict::Present;
            }
        }
    }

    row
}

/// Score two raw strings
///
/// # Errors
/// Returns `WordError` if either string is not a valid word.
pub fn score_letters(guess: &str, target: &str) -> Result<ScoreRow, WordError> {
    Ok(score(&Word::new(guess)?, &Word::new(target)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Verdict::{Absent as A, Correct as C, Present as P};

    fn scored(guess: &str, target: &str) -> ScoreRow {
        score_letters(guess, target).unwrap()
    }

    #[test]
    fn verdict_ordering() {
        assert!(C > P);
        assert!(P > A);
        assert_eq!([A, C, P].iter().max(), Some(&C));
    }

    #[test]
    fn score_single_duplicate_in_guess() {
        assert_eq!(scored("hello", "fecal"), [A, C, P, A, A]);
    }

    #[test]
    fn score_is_asymmetric_under_swap() {
        assert_eq!(scored("hello", "below"), [A, C, C, A, P]);
        assert_eq!(scored("below", "hello"), [A, C, C, P, A]);
    }

    #[test]
    fn score_repeated_correct_letters() {
        assert_eq!(scored("yummy", "mummy"), [A, C, C, C, C]);
    }

    #[test]
    fn score_disjoint_letters() {
        assert_eq!(scored("yield", "proof"), [A; WORD_LENGTH]);
    }

    #[test]
    fn score_identical() {
        assert_eq!(scored("hello", "hello"), [C; WORD_LENGTH]);
        assert!(Verdict::is_win(&scored("hello", "hello")));
    }

    #[test]
    fn score_tripled_letter_against_single_occurrence() {
        // Correct match consumes the only E
        assert_eq!(scored("geese", "those"), [A, A, A, C, C]);
        // No positional match: only the leftmost E stays Present
        assert_eq!(scored("geese", "eight"), [P, P, A, A, A]);
        // Correct further left still wins over the Present found first
        assert_eq!(scored("geese", "hello"), [A, C, A, A, A]);
    }

    #[test]
    fn score_case_insensitive() {
        assert_eq!(scored("HELLO", "fecal"), scored("hello", "FECAL"));
    }

    #[test]
    fn score_rejects_bad_input() {
        assert!(score_letters("hell", "hello").is_err());
        assert!(score_letters("hello", "h3llo").is_err());
    }

    #[test]
    fn row_to_emoji() {
        assert_eq!(Verdict::row_to_emoji(&[A, C, P, A, A]), "⬜🟩🟨⬜⬜");
        assert_eq!(C.symbol(), 'G');
        assert_eq!(P.to_string(), "present");
    }

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&P).unwrap(), "\"present\"");
        assert_eq!(serde_json::from_str::<Verdict>("\"absent\"").unwrap(), A);
    }

    proptest! {
        #[test]
        fn identical_words_score_all_correct(word in "[a-z]{5}") {
            let row = scored(&word, &word);
            prop_assert!(Verdict::is_win(&row));
        }

        #[test]
        fn letter_budget_never_exceeded(guess in "[a-e]{5}", target in "[a-e]{5}") {
            let g = Word::new(guess).unwrap();
            let t = Word::new(target).unwrap();
            let row = score(&g, &t);
            prop_assert_eq!(row.len(), WORD_LENGTH);

            for (letter, positions) in g.letter_positions() {
                let hits = positions.iter().filter(|&&i| row[i] != A).count();
                prop_assert!(hits <= t.count_of(letter));
            }
        }

        #[test]
        fn correct_only_on_positional_matches(guess in "[a-e]{5}", target in "[a-e]{5}") {
            let row = scored(&guess, &target);
            for (i, (g, t)) in guess.bytes().zip(target.bytes()).enumerate() {
                prop_assert_eq!(row[i] == C, g == t);
            }
        }
    }
}
