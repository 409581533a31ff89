//! Scoring audit - check the scoring guarantees over whole word lists
//!
//! Scores every accepted guess against every answer in parallel and reports
//! any pair whose verdict row breaks a guarantee.

use crate::core::{Verdict, Word, score};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// A pair whose verdict row broke a scoring guarantee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub guess: String,
    pub target: String,
    pub reason: String,
}

/// Outcome of an audit run
#[derive(Debug)]
pub struct AuditReport {
    pub targets: usize,
    pub pairs_checked: usize,
    pub violations: Vec<Violation>,
    pub duration: Duration,
}

/// Check one `(guess, target)` pair; returns the first broken guarantee
#[must_use]
pub fn check_pair(guess: &Word, target: &Word) -> Option<String> {
    let row = score(guess, target);

    for (i, (&g, &t)) in guess.chars().iter().zip(target.chars()).enumerate() {
        let correct = row[i] == Verdict::Correct;
        if correct != (g == t) {
            return Some(format!("position {} is {:?}", i + 1, row[i]));
        }
    }

    for (letter, positions) in guess.letter_positions() {
        let credited = positions
            .iter()
            .filter(|&&i| row[i] != Verdict::Absent)
            .count();
        let available = target.count_of(letter);
        if credited > available {
            return Some(format!(
                "'{}' credited {credited} times but appears {available} times",
                char::from(letter)
            ));
        }
    }

    if guess == target && !Verdict::is_win(&row) {
        return Some("self-score is not all correct".to_string());
    }

    None
}

/// Audit every accepted guess against the first `limit` answers
#[must_use]
pub fn run_audit(answers: &[Word], accepted: &[Word], limit: Option<usize>) -> AuditReport {
    let targets: Vec<&Word> = answers
        .iter()
        .take(limit.unwrap_or(answers.len()))
        .collect();

    println!(
        "🔍 Auditing {} targets against {} guesses...",
        targets.len(),
        accepted.len()
    );

    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );

    let start = Instant::now();

    let violations: Vec<Violation> = targets
        .par_iter()
        .flat_map_iter(|&target| {
            // Every target must also score perfectly against itself
            let found: Vec<Violation> = accepted
                .iter()
                .chain(std::iter::once(target))
                .filter_map(|guess| {
                    check_pair(guess, target).map(|reason| Violation {
                        guess: guess.text().to_string(),
                        target: target.text().to_string(),
                        reason,
                    })
                })
                .collect();
            pb.inc(1);
            found
        })
        .collect();

    pb.finish_with_message("Complete!");

    AuditReport {
        targets: targets.len(),
        pairs_checked: targets.len() * (accepted.len() + 1),
        violations,
        duration: start.elapsed(),
    }
}
