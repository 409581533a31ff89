//! Persistence of the session and statistics records
//!
//! Raw storage is a [`KeyValueStore`] of JSON strings. [`Records`] sits on top of
//! it, decoding each record field by field and falling back to defaults for
//! anything missing, malformed or corrupt.

mod records;
mod store;

pub use records::Records;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use thiserror::Error;

/// Key of the session record
pub const SESSION_KEY: &str = "wordle-clone-game-state";

/// Key of the session record for practice games with a random target
pub const PRACTICE_SESSION_KEY: &str = "wordle-clone-practice-state";

/// Key of the statistics record
pub const STATISTICS_KEY: &str = "wordle-clone-stats";

/// Errors from reading or writing stored records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read or write record")]
    Io(#[from] std::io::Error),

    #[error("could not replace record file")]
    Persist(#[from] tempfile::PersistError),

    #[error("trouble serializing record")]
    Serde(#[from] serde_json::Error),

    /// Stored data could not be parsed; the record is discarded on load
    #[error("record '{key}' is corrupt: {reason}")]
    CorruptPersistedState { key: String, reason: String },
}
