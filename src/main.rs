//! Wordle Daily - CLI
//!
//! Play the daily five-letter word in a TUI or a line-based mode, with
//! persistent streaks and statistics, plus a scoring audit.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use wordle_daily::{
    commands::{run_audit, run_simple},
    core::{Word, score_letters},
    game::{Game, GameConfig, StreakPolicy},
    output::{print_audit_report, print_score_row, print_statistics, share_text},
    storage::{FileStore, Records},
    wordlists::{
        ALLOWED, ANSWERS,
        loader::{load_from_file, words_from_slice},
        puzzle_number, random_target, target_for_date,
    },
};

#[derive(Parser)]
#[command(
    name = "wordle_daily",
    about = "Daily five-letter word game with persistent streaks and guess statistics",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory the game and statistics records are kept in
    #[arg(long, global = true, env = "WORDLE_DATA_DIR", default_value = ".wordle")]
    data_dir: PathBuf,

    /// Accepted guesses: 'embedded' (default) or path to a file, one word per line
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Which finished games extend the streak
    #[arg(long, global = true, value_enum, default_value_t = StreakPolicy::EveryGame)]
    streak_policy: StreakPolicy,

    /// Practice on a random answer; today's board and statistics are untouched
    #[arg(long, global = true)]
    random: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based game without TUI)
    Simple,

    /// Show statistics and today's result
    Stats,

    /// Start today's board over, keeping statistics
    Reset,

    /// Score a guess against a target
    Score {
        /// The guessed word
        guess: String,

        /// The word being guessed
        target: String,
    },

    /// Check the scoring guarantees over every answer and accepted guess
    Audit {
        /// Limit number of answers to audit
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Set up `env_logger`: `warn` unless `RUST_LOG` says otherwise
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

/// Load the accepted guess list based on the -w flag
///
/// Every answer is accepted on top of the chosen list.
fn load_accepted(wordlist: &str, answers: &[Word]) -> Result<Vec<Word>> {
    let mut accepted = match wordlist {
        "embedded" => words_from_slice(ALLOWED),
        path => load_from_file(path)
            .with_context(|| format!("Failed to load word list from {path}"))?,
    };
    accepted.extend(answers.iter().cloned());
    Ok(accepted)
}

/// Build today's game configuration and its puzzle number (`None` for random games)
fn build_config(cli: &Cli, answers: &[Word]) -> Result<(GameConfig, Option<i64>)> {
    let today = Local::now().date_naive();
    let (target, puzzle) = if cli.random {
        (random_target(answers), None)
    } else {
        (target_for_date(answers, today), Some(puzzle_number(today)))
    };
    let target = target.context("Answer list is empty")?.clone();
    log::debug!("Target chosen for puzzle {puzzle:?}");

    let accepted = load_accepted(&cli.wordlist, answers)?;
    let config = GameConfig::new(target, &accepted).with_streak_policy(cli.streak_policy);
    Ok((config, puzzle))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let answers = words_from_slice(ANSWERS);

    // Default to Play mode if no command given
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);

    match command {
        Commands::Score { guess, target } => run_score_command(guess, target),
        Commands::Audit { limit } => {
            let accepted = load_accepted(&cli.wordlist, &answers)?;
            let report = run_audit(&answers, &accepted, *limit);
            print_audit_report(&report);
            Ok(())
        }
        Commands::Play | Commands::Simple | Commands::Stats | Commands::Reset => {
            let (config, puzzle) = build_config(&cli, &answers)?;
            let store = FileStore::new(&cli.data_dir);
            let mut records = if cli.random {
                Records::practice(store)
            } else {
                Records::new(store)
            };

            // Showing statistics never rewrites the stored board
            if matches!(command, Commands::Stats) {
                let game = records.peek_game(config);
                if let Some(share) = puzzle.and_then(|n| share_text(n, game.session())) {
                    println!("\n{share}");
                }
                print_statistics(game.statistics(), game.session());
                return Ok(());
            }

            let game = records.load_game(config).with_context(|| {
                format!("Failed to prepare records in {}", cli.data_dir.display())
            })?;

            match command {
                Commands::Simple => {
                    run_simple(game, &mut records, puzzle, io::stdin().lock())?;
                    Ok(())
                }
                Commands::Reset => run_reset_command(game, &mut records),
                _ => run_play_command(game, records),
            }
        }
    }
}

fn run_score_command(guess: &str, target: &str) -> Result<()> {
    let row = score_letters(guess, target)
        .context("Both words must be five ASCII letters")?;
    print_score_row(guess, &row);
    Ok(())
}

fn run_reset_command(mut game: Game, records: &mut Records<FileStore>) -> Result<()> {
    game.reset();
    records
        .save_session(game.session())
        .context("Failed to save the reset board")?;
    println!("🔄 Board reset. Statistics kept.");
    Ok(())
}

fn run_play_command(game: Game, records: Records<FileStore>) -> Result<()> {
    use wordle_daily::interactive::{App, run_tui};

    let app = App::new(game, records);
    run_tui(app)
}
