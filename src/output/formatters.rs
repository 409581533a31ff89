//! Formatting utilities for terminal output

use crate::core::{MAX_GUESSES, Verdict, Word};
use crate::game::{Outcome, Session, Status};
use chrono::{Duration, NaiveDateTime};

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Message shown when a game ends: praise on a win, the answer on a loss
#[must_use]
pub fn game_over_message(outcome: Outcome, target: &Word) -> String {
    match outcome {
        Outcome::Won { guesses } => match guesses {
            1 => "Genius",
            2 => "Magnificent",
            3 => "Impressive",
            4 => "Splendid",
            5 => "Great",
            _ => "Phew",
        }
        .to_string(),
        Outcome::Lost => target.text().to_uppercase(),
    }
}

/// Emoji summary of a finished board, e.g. `Wordle 986 3/6` followed by the rows
///
/// Returns `None` while the game is still in progress.
#[must_use]
pub fn share_text(puzzle_number: i64, session: &Session) -> Option<String> {
    let tries = match session.status() {
        Status::InProgress => return None,
        Status::Win => session.guesses_made().to_string(),
        Status::Lose => "X".to_string(),
    };

    let mut text = format!("Wordle {puzzle_number} {tries}/{MAX_GUESSES}\n");
    for (_, row) in session.submitted() {
        text.push('\n');
        text.push_str(&Verdict::row_to_emoji(row));
    }
    Some(text)
}

/// Time left until the next daily word (local midnight)
#[must_use]
pub fn until_next_puzzle(now: NaiveDateTime) -> Duration {
    now.date()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .map_or_else(Duration::zero, |midnight| midnight - now)
}

/// Format a duration as `HH:MM:SS`
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Submission};
    use chrono::{NaiveDate, Utc};

    fn finished_session(target: &str, guesses: &[&str]) -> Session {
        let accepted: Vec<Word> = guesses.iter().map(|w| Word::new(*w).unwrap()).collect();
        let config = GameConfig::new(Word::new(target).unwrap(), &accepted);
        let mut session = Session::new(config.target());
        for guess in guesses {
            for c in guess.chars() {
                session.add_letter(c);
            }
            let _: Submission = session.submit(&config, Utc::now()).unwrap();
        }
        session
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(create_progress_bar(0.0, 10.0, 4), "░░░░");
        assert_eq!(create_progress_bar(10.0, 10.0, 4), "████");
        assert_eq!(create_progress_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(create_progress_bar(3.0, 0.0, 2), "░░");
    }

    #[test]
    fn game_over_messages() {
        let target = Word::new("hello").unwrap();
        assert_eq!(game_over_message(Outcome::Won { guesses: 1 }, &target), "Genius");
        assert_eq!(game_over_message(Outcome::Won { guesses: 6 }, &target), "Phew");
        assert_eq!(game_over_message(Outcome::Lost, &target), "HELLO");
    }

    #[test]
    fn share_text_for_win() {
        let session = finished_session("hello", &["below", "hello"]);
        assert_eq!(
            share_text(986, &session).unwrap(),
            "Wordle 986 2/6\n\n⬜🟩🟩🟨⬜\n🟩🟩🟩🟩🟩"
        );
    }

    #[test]
    fn share_text_for_loss_and_in_progress() {
        let lost = finished_session(
            "hello",
            &["below", "fecal", "growl", "melts", "share", "wrong"],
        );
        assert!(share_text(1, &lost).unwrap().starts_with("Wordle 1 X/6\n"));

        let playing = finished_session("hello", &["below"]);
        assert_eq!(share_text(1, &playing), None);
    }

    #[test]
    fn countdown_to_midnight() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(22, 30, 15)
            .unwrap();
        assert_eq!(format_countdown(until_next_puzzle(now)), "01:29:45");
        assert_eq!(format_countdown(Duration::seconds(-5)), "00:00:00");
    }
}
