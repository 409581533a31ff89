//! Word list loading utilities
//!
//! Turns embedded constants or text files (one word per line) into `Word`s.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;

/// Load an accepted-guess list from a file
///
/// Blank lines and `#` comments are skipped, as are entries that are not valid
/// words; the number of rejected entries is logged.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_daily::wordlists::loader::load_from_file;
///
/// let words = load_from_file("words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let (words, rejected) = parse_word_list(&content);

    if rejected > 0 {
        log::warn!("Skipped {rejected} invalid entries in {}", path.display());
    }
    log::debug!("Loaded {} words from {}", words.len(), path.display());

    Ok(words)
}

/// Parse one word per line, returning the valid words and a count of rejects
#[must_use]
pub fn parse_word_list(content: &str) -> (Vec<Word>, usize) {
    let mut rejected = 0;
    let words = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let word = Word::new(line).ok();
            if word.is_none() {
                rejected += 1;
            }
            word
        })
        .collect();

    (words, rejected)
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use wordle_daily::wordlists::loader::words_from_slice;
/// use wordle_daily::wordlists::ANSWERS;
///
/// let words = words_from_slice(ANSWERS);
/// assert_eq!(words.len(), ANSWERS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
