//! Schema-checked loading and saving of the session and statistics records
//!
//! Each stored record is a JSON object. Fields are decoded one at a time; a
//! field that is missing or has the wrong shape takes its default, unknown
//! fields are ignored, and a record that is not a JSON object at all is
//! discarded.

use super::{KeyValueStore, PRACTICE_SESSION_KEY, SESSION_KEY, STATISTICS_KEY, StoreError};
use crate::game::{
    Game, GameConfig, GuessDistribution, Session, SessionParts, Statistics, Status, Submission,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Typed access to the two records kept in a [`KeyValueStore`]
///
/// Daily records use [`SESSION_KEY`] and keep the statistics up to date.
/// Practice records keep their board under [`PRACTICE_SESSION_KEY`] and never
/// write statistics, so a random game cannot disturb the daily one.
#[derive(Debug, Clone)]
pub struct Records<S> {
    store: S,
    session_key: &'static str,
    track_statistics: bool,
}

impl<S: KeyValueStore> Records<S> {
    /// Records for the daily game
    pub const fn new(store: S) -> Self {
        Self {
            store,
            session_key: SESSION_KEY,
            track_statistics: true,
        }
    }

    /// Records for a practice game against a random target
    pub const fn practice(store: S) -> Self {
        Self {
            store,
            session_key: PRACTICE_SESSION_KEY,
            track_statistics: false,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored session merged over defaults
    pub fn load_session(&mut self) -> Session {
        let Some(fields) = self.read_object(self.session_key) else {
            return Session::default();
        };

        Session::restore(SessionParts {
            active_row: field(&fields, &["activeRow"]),
            board: field(&fields, &["boardState"]),
            scores: field(&fields, &["scores"]),
            status: status_field(&fields),
            last_completed: timestamp_field(&fields, &["lastCompletedTs"]),
            last_played: timestamp_field(&fields, &["lastPlayedTs"]),
            target: field(&fields, &["target"]),
        })
    }

    /// Load the stored statistics merged over defaults
    pub fn load_statistics(&mut self) -> Statistics {
        let Some(fields) = self.read_object(STATISTICS_KEY) else {
            return Statistics::default();
        };

        Statistics::restore(
            field(&fields, &["currentStreak"]).unwrap_or(0),
            field(&fields, &["maxStreak"]).unwrap_or(0),
            field(&fields, &["gamesPlayed", "played"]).unwrap_or(0),
            field::<GuessDistribution>(&fields, &["guessDistribution"]).unwrap_or_default(),
        )
    }

    /// Load both records and assemble a game for `config`
    ///
    /// If the stored board belonged to another target it is reset, and the
    /// reset board is written back.
    ///
    /// # Errors
    /// Returns `StoreError` if writing the reset session fails.
    pub fn load_game(&mut self, config: GameConfig) -> Result<Game, StoreError> {
        let session = self.load_session();
        let stored_target = session.target().map(str::to_string);

        let game = Game::new(config, session, self.load_statistics());
        if game.session().target() != stored_target.as_deref() {
            self.save_session(game.session())?;
        }
        Ok(game)
    }

    /// Like [`Records::load_game`], but a rolled-over board is not written back
    #[must_use]
    pub fn peek_game(&mut self, config: GameConfig) -> Game {
        let session = self.load_session();
        Game::new(config, session, self.load_statistics())
    }

    /// # Errors
    /// Returns `StoreError` if serialization or the store write fails.
    pub fn save_session(&mut self, session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string(session)?;
        self.store.put(self.session_key, &json)?;
        log::debug!("Saved session ({:?}, row {})", session.status(), session.active_row());
        Ok(())
    }

    /// # Errors
    /// Returns `StoreError` if serialization or the store write fails.
    pub fn save_statistics(&mut self, statistics: &Statistics) -> Result<(), StoreError> {
        let json = serde_json::to_string(statistics)?;
        self.store.put(STATISTICS_KEY, &json)?;
        log::debug!("Saved statistics ({} games)", statistics.games_played());
        Ok(())
    }

    /// Persist what an accepted submit changed
    ///
    /// The session is written after every accepted submit; statistics only
    /// when the game finished, and never for practice records.
    ///
    /// # Errors
    /// Returns `StoreError` if either write fails.
    pub fn save_after_submit(
        &mut self,
        game: &Game,
        submission: &Submission,
    ) -> Result<(), StoreError> {
        self.save_session(game.session())?;
        if self.track_statistics && submission.finished().is_some() {
            self.save_statistics(game.statistics())?;
        }
        Ok(())
    }

    fn read_object(&mut self, key: &str) -> Option<Map<String, Value>> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read record '{key}', using defaults: {e}");
                return None;
            }
        };

        match parse_object(key, &raw) {
            Ok(fields) => Some(fields),
            Err(e) => {
                log::warn!("Discarding stored record: {e}");
                if let Err(e) = self.store.remove(key) {
                    log::warn!("Could not remove corrupt record '{key}': {e}");
                }
                None
            }
        }
    }
}

fn parse_object(key: &str, raw: &str) -> Result<Map<String, Value>, StoreError> {
    let corrupt = |reason: String| StoreError::CorruptPersistedState {
        key: key.to_string(),
        reason,
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(corrupt(format!("expected an object, found {other}"))),
        Err(e) => Err(corrupt(e.to_string())),
    }
}

/// Decode the first present key among `keys`, `None` if absent or malformed
fn field<T: DeserializeOwned>(fields: &Map<String, Value>, keys: &[&str]) -> Option<T> {
    let (key, value) = keys
        .iter()
        .find_map(|&key| fields.get(key).map(|value| (key, value)))?;

    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::debug!("Ignoring stored field '{key}': {e}");
            None
        }
    }
}

/// Status by name, or by the numeric codes older records used
fn status_field(fields: &Map<String, Value>) -> Option<Status> {
    match fields.get("status")? {
        Value::Number(n) => match n.as_u64()? {
            0 => Some(Status::InProgress),
            1 => Some(Status::Win),
            2 => Some(Status::Lose),
            _ => None,
        },
        _ => field(fields, &["status"]),
    }
}

/// Epoch milliseconds; zero or negative means "never"
fn timestamp_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    field::<i64>(fields, keys)
        .filter(|&millis| millis > 0)
        .and_then(DateTime::from_timestamp_millis)
}
