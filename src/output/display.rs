//! Display functions for command results

use super::formatters::create_progress_bar;
use crate::commands::AuditReport;
use crate::core::{KeyboardState, ScoreRow, Verdict};
use crate::game::{Session, Statistics, Status};
use colored::{ColoredString, Colorize};

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

fn paint(letter: char, verdict: Option<Verdict>) -> ColoredString {
    let cell = format!(" {} ", letter.to_ascii_uppercase());
    match verdict {
        Some(Verdict::Correct) => cell.black().on_green().bold(),
        Some(Verdict::Present) => cell.black().on_yellow().bold(),
        Some(Verdict::Absent) => cell.white().on_bright_black(),
        None => cell.normal(),
    }
}

/// Print one scored guess as coloured tiles followed by its emoji row
pub fn print_score_row(guess: &str, row: &ScoreRow) {
    let tiles: String = guess
        .chars()
        .zip(row)
        .map(|(c, v)| paint(c, Some(*v)).to_string())
        .collect();
    println!("   {tiles}  {}", Verdict::row_to_emoji(row));
}

/// Print every submitted row of the board
pub fn print_board(session: &Session) {
    println!();
    for (guess, row) in session.submitted() {
        print_score_row(guess, row);
    }
    println!();
}

/// Print the on-screen keyboard coloured by the best verdict per letter
pub fn print_keyboard(keyboard: &KeyboardState) {
    for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
        let keys: String = row
            .chars()
            .map(|c| paint(c, keyboard.get(c)).to_string())
            .collect();
        println!("   {}{keys}", " ".repeat(indent * 2));
    }
    println!();
}

/// Print player statistics with the guess distribution chart
pub fn print_statistics(stats: &Statistics, session: &Session) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Summary:".bright_cyan().bold());
    println!("   Played:          {}", stats.games_played());
    println!(
        "   Win %:           {}",
        stats.win_percentage().to_string().bright_yellow().bold()
    );
    println!(
        "   Current streak:  {}",
        stats.current_streak().to_string().green()
    );
    println!("   Max streak:      {}", stats.max_streak());

    let distribution = stats.guess_distribution();
    let max = f64::from(distribution.max_bucket());
    let today = (session.status() == Status::Win).then(|| session.guesses_made());

    println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
    for (guesses, wins) in distribution.iter() {
        let bar = create_progress_bar(f64::from(wins), max, 40);
        let bar = if today == Some(guesses) {
            bar.green().bold()
        } else {
            bar.bright_black()
        };
        println!("   {guesses}: {bar} {wins:4}");
    }
    let fails = distribution.fails();
    println!(
        "   X: {} {fails:4}",
        create_progress_bar(f64::from(fails), max, 40).red()
    );
}

/// Print the outcome of a scoring audit
pub fn print_audit_report(report: &AuditReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SCORING AUDIT".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Targets:        {}", report.targets);
    println!("   Pairs checked:  {}", report.pairs_checked);
    println!("   Time taken:     {:.2}s", report.duration.as_secs_f64());
    println!(
        "   Pairs/second:   {:.0}",
        report.pairs_checked as f64 / report.duration.as_secs_f64().max(f64::EPSILON)
    );

    if report.violations.is_empty() {
        println!("\n{}", "✅ All scoring guarantees hold".green().bold());
        return;
    }

    println!(
        "\n{}",
        format!("❌ {} violations", report.violations.len())
            .red()
            .bold()
    );
    for violation in report.violations.iter().take(20) {
        println!(
            "   {} vs {}: {}",
            violation.guess.to_uppercase(),
            violation.target.to_uppercase(),
            violation.reason
        );
    }
    if report.violations.len() > 20 {
        println!("   ... and {} more", report.violations.len() - 20);
    }
}
