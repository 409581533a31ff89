//! Interactive TUI mode
//!
//! Full-screen board with an on-screen keyboard, toasts and a statistics panel.

mod app;
mod rendering;
mod toast;

pub use app::{App, STATS_REVEAL_DELAY, run_tui};
pub use toast::{MessageStyle, TOAST_LIFETIME, Toast, Toasts};
