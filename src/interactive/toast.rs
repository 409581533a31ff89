//! Short-lived messages shown over the board

use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_LIFETIME: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub style: MessageStyle,
    expires_at: Instant,
}

/// Queue of toasts, oldest first
///
/// Expiry is checked against the caller's clock, so clearing the queue
/// cancels every pending dismissal with it.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, text: impl Into<String>, style: MessageStyle, now: Instant) {
        self.items.push(Toast {
            text: text.into(),
            style,
            expires_at: now + TOAST_LIFETIME,
        });

        // Keep only last 5 messages
        if self.items.len() > 5 {
            self.items.remove(0);
        }
    }

    /// Drop expired toasts; returns whether anything was removed
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.expires_at > now);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push("Not enough letters", MessageStyle::Error, start);
        toasts.push("Not in word list", MessageStyle::Error, start + Duration::from_millis(500));

        assert!(!toasts.prune(start + Duration::from_millis(1999)));
        assert!(toasts.prune(start + TOAST_LIFETIME));
        let left: Vec<&str> = toasts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(left, ["Not in word list"]);

        toasts.prune(start + Duration::from_secs(5));
        assert!(toasts.is_empty());
    }

    #[test]
    fn keeps_last_five() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        for i in 0..7 {
            toasts.push(format!("message {i}"), MessageStyle::Info, now);
        }
        assert_eq!(toasts.iter().count(), 5);
        assert_eq!(toasts.iter().next().map(|t| t.text.as_str()), Some("message 2"));
    }

    #[test]
    fn clear_cancels_pending() {
        let now = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push("Splendid", MessageStyle::Success, now);
        toasts.clear();
        assert!(!toasts.prune(now + TOAST_LIFETIME));
    }
}
