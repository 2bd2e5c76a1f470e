use crate::error::{GameLogError, Result};
use crate::game_log::{GameLog, StoredGameLog};
use crate::log_entry::EntryId;
use crate::substrate::Substrate;
use log::{debug, info};

/// Loads, mutates and persists per-game logs on top of a substrate.
///
/// Nothing is cached: `load` always re-reads and `save` always overwrites.
pub struct GameLogStore<S: Substrate> {
    substrate: S,
}

impl<S: Substrate> GameLogStore<S> {
    pub fn new(substrate: S) -> Self {
        Self { substrate }
    }

    #[cfg(test)]
    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    /// Returns the stored log for `game_id`, or an empty one when none exists.
    pub fn load(&self, game_id: i64) -> Result<GameLog> {
        let key = game_id.to_string();
        let Some(json) = self.substrate.get_item(&key)? else {
            info!("Game {} has no logs", game_id);
            return Ok(GameLog::new(game_id));
        };

        let stored: StoredGameLog =
            serde_json::from_str(&json).map_err(|e| GameLogError::MalformedStorage {
                key: key.clone(),
                reason: e.to_string(),
            })?;
        let log = GameLog::from_stored(&key, stored)?;
        debug!("Loaded {} entries for game {}", log.len(), game_id);
        Ok(log)
    }

    pub fn append<'a>(&self, log: &'a mut GameLog, text: &str) -> &'a mut GameLog {
        log.add_entry(text);
        log
    }

    pub fn remove_at<'a>(&self, log: &'a mut GameLog, index: usize) -> &'a mut GameLog {
        if log.remove_at(index).is_none() {
            debug!(
                "Ignoring delete of index {} in game {} ({} entries)",
                index,
                log.game_id(),
                log.len()
            );
        }
        log
    }

    pub fn remove_by_id<'a>(&self, log: &'a mut GameLog, id: EntryId) -> &'a mut GameLog {
        if log.remove_by_id(id).is_none() {
            debug!("Ignoring delete of unknown entry {} in game {}", id, log.game_id());
        }
        log
    }

    /// Writes the whole log under its game ID, replacing any previous value.
    pub fn save(&mut self, log: &GameLog) -> Result<()> {
        let json = serde_json::to_string(&log.to_stored())?;
        self.substrate.set_item(&log.game_id().to_string(), &json)?;
        debug!("Saved {} entries for game {}", log.len(), log.game_id());
        Ok(())
    }

    /// Game IDs that currently have a stored log.
    pub fn game_ids(&self) -> Result<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .substrate
            .keys()?
            .iter()
            .filter_map(|k| k.parse().ok())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::{FileSubstrate, MemorySubstrate};
    use tempfile::TempDir;

    fn memory_store() -> GameLogStore<MemorySubstrate> {
        GameLogStore::new(MemorySubstrate::new())
    }

    fn texts(log: &GameLog) -> Vec<String> {
        log.entries().iter().map(|e| e.text.clone()).collect()
    }

    #[test]
    fn load_on_fresh_substrate_is_empty() {
        let store = memory_store();
        let log = store.load(42).unwrap();
        assert_eq!(log.game_id(), 42);
        assert!(log.is_empty());
    }

    #[test]
    fn appended_entry_survives_save_and_load() {
        let mut store = memory_store();
        let mut log = store.load(42).unwrap();
        store.append(&mut log, "scouted enemy fleet");
        store.save(&log).unwrap();

        let reloaded = store.load(42).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].text, "scouted enemy fleet");
    }

    #[test]
    fn round_trip_preserves_order_timestamps_and_ids() {
        let mut store = memory_store();
        let mut log = store.load(9).unwrap();
        store.append(&mut log, "first");
        store.append(&mut log, "second\nwith a line break");
        store.append(&mut log, "third");
        store.save(&log).unwrap();

        let reloaded = store.load(9).unwrap();
        assert_eq!(reloaded, log);
    }

    #[test]
    fn load_is_idempotent() {
        let mut store = memory_store();
        let mut log = store.load(3).unwrap();
        store.append(&mut log, "note");
        store.save(&log).unwrap();

        assert_eq!(store.load(3).unwrap(), store.load(3).unwrap());
    }

    #[test]
    fn legacy_blob_keeps_stored_timestamps() {
        let mut substrate = MemorySubstrate::new();
        substrate
            .set_item(
                "34216",
                r#"{"gameId":34216,"logs":[{"text":"a","timestamp":1},{"text":"b","timestamp":2}]}"#,
            )
            .unwrap();
        let store = GameLogStore::new(substrate);

        let log = store.load(34216).unwrap();
        let stamps: Vec<i64> = log.entries().iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![1, 2]);
    }

    #[test]
    fn remove_at_and_out_of_range() {
        let store = memory_store();
        let mut log = GameLog::new(1);
        for text in ["A", "B", "C"] {
            store.append(&mut log, text);
        }

        store.remove_at(&mut log, 5);
        assert_eq!(texts(&log), vec!["A", "B", "C"]);

        store.remove_at(&mut log, 1);
        assert_eq!(texts(&log), vec!["A", "C"]);
    }

    #[test]
    fn remove_by_id_is_stable_across_mutations() {
        let store = memory_store();
        let mut log = GameLog::new(1);
        for text in ["A", "B", "C"] {
            store.append(&mut log, text);
        }
        let target = log.entries()[2].id;

        store.remove_at(&mut log, 0);
        store.remove_by_id(&mut log, target);
        assert_eq!(texts(&log), vec!["B"]);
    }

    #[test]
    fn games_are_isolated() {
        let mut store = memory_store();
        let mut other = store.load(200).unwrap();
        store.append(&mut other, "untouched");
        store.save(&other).unwrap();
        let before = store.substrate().get_item("200").unwrap();

        let mut log = store.load(100).unwrap();
        store.append(&mut log, "only here");
        store.save(&log).unwrap();

        assert_eq!(store.substrate().get_item("200").unwrap(), before);
        assert_eq!(store.game_ids().unwrap(), vec![100, 200]);
    }

    #[test]
    fn malformed_json_is_reported() {
        let mut substrate = MemorySubstrate::new();
        substrate.set_item("5", "{not json").unwrap();
        let store = GameLogStore::new(substrate);

        let err = store.load(5).unwrap_err();
        assert!(matches!(err, GameLogError::MalformedStorage { ref key, .. } if key == "5"));
    }

    #[test]
    fn wrong_shape_is_reported() {
        let mut substrate = MemorySubstrate::new();
        substrate
            .set_item("5", r#"{"gameId":5,"logs":[{"text":"no timestamp"}]}"#)
            .unwrap();
        let store = GameLogStore::new(substrate);

        assert!(matches!(
            store.load(5),
            Err(GameLogError::MalformedStorage { .. })
        ));
    }

    #[test]
    fn file_backed_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = GameLogStore::new(FileSubstrate::open(dir.path()).unwrap());
        let mut log = store.load(34216).unwrap();
        store.append(&mut log, "built warp gate");
        store.save(&log).unwrap();

        let reopened = GameLogStore::new(FileSubstrate::open(dir.path()).unwrap());
        assert_eq!(reopened.load(34216).unwrap(), log);
    }
}
