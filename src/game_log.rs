use crate::error::{GameLogError, Result};
use crate::log_entry::{EntryId, LogEntry};
use serde::{Deserialize, Serialize};

/// All notes for one game, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLog {
    game_id: i64,
    logs: Vec<LogEntry>,
}

impl GameLog {
    pub fn new(game_id: i64) -> Self {
        Self {
            game_id,
            logs: Vec::new(),
        }
    }

    pub fn game_id(&self) -> i64 {
        self.game_id
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.logs.last()
    }

    /// Appends a note stamped with the current time and returns it.
    pub fn add_entry(&mut self, text: impl Into<String>) -> &LogEntry {
        let entry = LogEntry::new(self.game_id, text.into());
        self.push(entry)
    }

    fn push(&mut self, entry: LogEntry) -> &LogEntry {
        debug_assert_eq!(entry.game_id, self.game_id);
        self.logs.push(entry);
        &self.logs[self.logs.len() - 1]
    }

    /// Removes the entry at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<LogEntry> {
        if index < self.logs.len() {
            Some(self.logs.remove(index))
        } else {
            None
        }
    }

    pub fn remove_by_id(&mut self, id: EntryId) -> Option<LogEntry> {
        let index = self.logs.iter().position(|e| e.id == id)?;
        Some(self.logs.remove(index))
    }

    /// Entries newest first, paired with their storage index.
    pub fn newest_first(&self) -> impl Iterator<Item = (usize, &LogEntry)> {
        self.logs.iter().enumerate().rev()
    }

    /// Maps a 1-based position in the newest-first listing to a storage index.
    pub fn storage_index_for_display(&self, position: usize) -> Option<usize> {
        if position == 0 || position > self.logs.len() {
            return None;
        }
        Some(self.logs.len() - position)
    }

    pub fn to_stored(&self) -> StoredGameLog {
        StoredGameLog {
            game_id: self.game_id,
            logs: self
                .entries()
                .iter()
                .map(|e| StoredEntry {
                    id: Some(e.id),
                    text: e.text.clone(),
                    timestamp: e.timestamp,
                })
                .collect(),
        }
    }

    /// Rebuilds a log from its persisted form, keeping order and timestamps.
    pub fn from_stored(key: &str, stored: StoredGameLog) -> Result<Self> {
        let expected: Option<i64> = key.parse().ok();
        if expected != Some(stored.game_id) {
            return Err(GameLogError::MalformedStorage {
                key: key.to_string(),
                reason: format!("entry belongs to game {}", stored.game_id),
            });
        }

        let mut log = GameLog::new(stored.game_id);
        for entry in stored.logs {
            let mut hydrated =
                LogEntry::with_timestamp(stored.game_id, entry.text, entry.timestamp);
            if let Some(id) = entry.id {
                hydrated.id = id;
            }
            log.push(hydrated);
        }
        Ok(log)
    }
}

/// Exported form written to the substrate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGameLog {
    pub game_id: i64,
    pub logs: Vec<StoredEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    pub text: String,
    pub timestamp: i64,
}
