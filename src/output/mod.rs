//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_audit_report, print_board, print_keyboard, print_score_row, print_statistics,
};
pub use formatters::{
    create_progress_bar, format_countdown, game_over_message, share_text, until_next_puzzle,
};
