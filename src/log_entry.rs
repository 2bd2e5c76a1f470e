use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a single note, assigned when the note is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First block of the UUID, enough to tell entries apart on screen.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single timestamped note attached to a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: EntryId,
    pub game_id: i64,
    pub text: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(game_id: i64, text: String) -> Self {
        Self::with_timestamp(game_id, text, now_millis())
    }

    pub fn with_timestamp(game_id: i64, text: String, timestamp: i64) -> Self {
        Self {
            id: EntryId::new(),
            game_id,
            text,
            timestamp,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
