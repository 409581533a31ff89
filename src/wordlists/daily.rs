//! Choosing the target word

use crate::core::Word;
use chrono::{Datelike, NaiveDate};
use rand::prelude::IndexedRandom;

/// Day number of 2021-06-19, the first puzzle, counted from 0001-01-01 (day 1)
pub const EPOCH_DAYS_FROM_CE: i32 = 737_960;

/// Puzzle number for a calendar date; negative before the first puzzle
#[must_use]
pub fn puzzle_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
}

/// The target for `date`, cycling through `answers` one word per day
///
/// Returns `None` if `answers` is empty.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wordle_daily::core::Word;
/// use wordle_daily::wordlists::target_for_date;
///
/// let answers: Vec<Word> = ["hello", "below"].iter().map(|w| Word::new(*w).unwrap()).collect();
/// let first_day = NaiveDate::from_ymd_opt(2021, 6, 19).unwrap();
///
/// assert_eq!(target_for_date(&answers, first_day).unwrap().text(), "hello");
/// assert_eq!(target_for_date(&answers, first_day.succ_opt().unwrap()).unwrap().text(), "below");
/// ```
#[must_use]
pub fn target_for_date(answers: &[Word], date: NaiveDate) -> Option<&Word> {
    let len = i64::try_from(answers.len()).ok().filter(|&len| len > 0)?;
    let index = usize::try_from(puzzle_number(date).rem_euclid(len)).ok()?;
    answers.get(index)
}

/// A uniformly random target
#[must_use]
pub fn random_target(answers: &[Word]) -> Option<&Word> {
    answers.choose(&mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn answers() -> Vec<Word> {
        ["hello", "below", "fecal"]
            .iter()
            .map(|w| Word::new(*w).unwrap())
            .collect()
    }

    fn first_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 19).unwrap()
    }

    #[test]
    fn puzzle_numbers() {
        assert_eq!(puzzle_number(first_day()), 0);
        assert_eq!(puzzle_number(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), 986);
        assert_eq!(puzzle_number(first_day().pred_opt().unwrap()), -1);
    }

    #[test]
    fn cycles_through_answers() {
        let answers = answers();
        let day = |n: u64| first_day().checked_add_days(Days::new(n)).unwrap();

        assert_eq!(target_for_date(&answers, day(0)).unwrap().text(), "hello");
        assert_eq!(target_for_date(&answers, day(2)).unwrap().text(), "fecal");
        assert_eq!(target_for_date(&answers, day(3)).unwrap().text(), "hello");
    }

    #[test]
    fn dates_before_first_puzzle_wrap() {
        let answers = answers();
        let before = first_day().pred_opt().unwrap();
        assert_eq!(target_for_date(&answers, before).unwrap().text(), "fecal");
    }

    #[test]
    fn empty_answers() {
        assert!(target_for_date(&[], first_day()).is_none());
        assert!(random_target(&[]).is_none());
    }

    #[test]
    fn random_target_is_an_answer() {
        let answers = answers();
        let target = random_target(&answers).unwrap();
        assert!(answers.contains(target));
    }
}
