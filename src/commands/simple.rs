//! Simple interactive CLI mode
//!
//! Line-based game on stdin/stdout without the TUI

use crate::core::WORD_LENGTH;
use crate::game::{Game, GuessError, Status};
use crate::output::{game_over_message, print_board, print_keyboard, print_statistics, share_text};
use crate::storage::{KeyValueStore, Records};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Run the simple interactive CLI mode
///
/// Reads one guess per line from `input` until the game ends, the player
/// types `quit`, or input runs out. `new` starts the board over. Returns the
/// game in its final state.
///
/// # Errors
///
/// Returns an error if reading input fails or progress cannot be saved.
pub fn run_simple<S: KeyValueStore>(
    mut game: Game,
    records: &mut Records<S>,
    puzzle: Option<i64>,
    mut input: impl BufRead,
) -> Result<Game> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Wordle - Simple Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Guess the five-letter word in six tries.");
    println!("Commands: 'quit' to exit, 'new' to start the board over\n");

    if game.session().status().is_terminal() {
        println!("You have already finished today's word.");
        finish(&game, puzzle);
        return Ok(game);
    }

    print_board(game.session());

    loop {
        let Some(line) = prompt(&mut input, game.session().active_row() + 1)? else {
            println!();
            return Ok(game);
        };

        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(game);
            }
            "new" | "n" => {
                game.reset();
                records
                    .save_session(game.session())
                    .context("Failed to save the reset board")?;
                println!("\n🔄 New board started!\n");
                continue;
            }
            guess => {
                if let Err(e) = check_line(guess) {
                    println!("❌ {e}\n");
                    continue;
                }
                while game.delete_letter() {}
                for c in guess.chars() {
                    game.add_letter(c);
                }
            }
        }

        match game.submit(Utc::now()) {
            Ok(submission) => {
                records
                    .save_after_submit(&game, &submission)
                    .context("Failed to save progress")?;
                print_board(game.session());

                if let Some(finished) = submission.finished() {
                    let message = game_over_message(finished.outcome, game.config().target());
                    let message = if game.session().status() == Status::Win {
                        message.green().bold()
                    } else {
                        message.red().bold()
                    };
                    println!("  {message}");
                    finish(&game, puzzle);
                    return Ok(game);
                }

                print_keyboard(&game.keyboard());
            }
            Err(GuessError::GameOver) => return Ok(game),
            Err(e) => {
                // Leave the row empty for the next attempt
                while game.delete_letter() {}
                println!("❌ {e}\n");
            }
        }
    }
}

fn finish(game: &Game, puzzle: Option<i64>) {
    if let Some(share) = puzzle.and_then(|n| share_text(n, game.session())) {
        println!("\n{share}");
    }
    print_statistics(game.statistics(), game.session());
    println!();
}

/// A typed line must be exactly one word of `WORD_LENGTH` ASCII letters
fn check_line(line: &str) -> Result<(), GuessError> {
    if line.chars().count() < WORD_LENGTH {
        return Err(GuessError::IncompleteGuess);
    }
    if line.len() != WORD_LENGTH || !line.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GuessError::UnknownWord(line.to_string()));
    }
    Ok(())
}

/// Prompt for a guess; `None` at end of input
fn prompt(input: &mut impl BufRead, row: usize) -> Result<Option<String>> {
    print!("Guess {row}: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::GameConfig;
    use crate::storage::MemoryStore;

    fn setup() -> (Game, Records<MemoryStore>) {
        let accepted: Vec<Word> = ["hello", "below", "fecal"]
            .iter()
            .map(|w| Word::new(*w).unwrap())
            .collect();
        let config = GameConfig::new(Word::new("hello").unwrap(), &accepted);
        let mut records = Records::new(MemoryStore::new());
        let game = records.load_game(config).unwrap();
        (game, records)
    }

    #[test]
    fn plays_to_a_win_and_saves() {
        let (game, mut records) = setup();
        let input = "hel\nzzzzz\nbelow\nhello\n".as_bytes();

        let game = run_simple(game, &mut records, Some(986), input).unwrap();
        assert_eq!(game.session().status(), Status::Win);
        assert_eq!(game.session().guesses_made(), 2);

        let stats = records.load_statistics();
        assert_eq!(stats.games_played(), 1);
        assert_eq!(stats.guess_distribution().wins_in(2), 1);
    }

    #[test]
    fn rejected_guess_clears_row() {
        let (game, mut records) = setup();
        let game = run_simple(game, &mut records, None, "zzzzz\n".as_bytes()).unwrap();

        assert_eq!(game.session().status(), Status::InProgress);
        assert_eq!(game.session().current_row(), "");
        assert_eq!(game.session().active_row(), 0);
    }

    #[test]
    fn malformed_lines_are_rejected_whole() {
        let (game, mut records) = setup();
        let game = run_simple(game, &mut records, None, "hellos\nhel lo\nhe\n".as_bytes())
            .unwrap();

        assert_eq!(game.session().status(), Status::InProgress);
        assert_eq!(game.session().active_row(), 0);
        assert_eq!(game.session().current_row(), "");
        assert_eq!(records.load_statistics().games_played(), 0);
    }

    #[test]
    fn line_checks() {
        assert_eq!(check_line("hello"), Ok(()));
        assert_eq!(check_line("hel"), Err(GuessError::IncompleteGuess));
        assert_eq!(
            check_line("hellos"),
            Err(GuessError::UnknownWord("hellos".to_string()))
        );
        assert_eq!(
            check_line("hel-o"),
            Err(GuessError::UnknownWord("hel-o".to_string()))
        );
    }

    #[test]
    fn new_resets_board_and_quit_stops() {
        let (game, mut records) = setup();
        let game = run_simple(game, &mut records, None, "below\nnew\nquit\nhello\n".as_bytes())
            .unwrap();

        assert_eq!(game.session().active_row(), 0);
        assert_eq!(game.session().status(), Status::InProgress);
        assert_eq!(records.load_session().active_row(), 0);
    }
}
