use crate::error::{GameLogError, Result};
use crate::game_id;
use crate::game_log::GameLog;
use crate::log_entry::EntryId;
use crate::store::GameLogStore;
use crate::substrate::Substrate;
use crate::tab_resolver::TabResolver;
use log::{info, warn};

/// What the popup does for one user action: find the game, then
/// load, mutate and save its log.
pub struct GameSession<S: Substrate, R: TabResolver> {
    store: GameLogStore<S>,
    resolver: R,
}

impl<S: Substrate, R: TabResolver> GameSession<S, R> {
    pub fn new(store: GameLogStore<S>, resolver: R) -> Self {
        Self { store, resolver }
    }

    pub fn store(&self) -> &GameLogStore<S> {
        &self.store
    }

    pub async fn game_id(&self) -> Result<i64> {
        let url = match self.resolver.active_tab_url().await {
            Ok(url) => url,
            Err(e) => {
                warn!("Could not determine url: {}", e);
                return Err(GameLogError::InvalidGameId(e.to_string()));
            }
        };
        game_id::resolve_game_id(&url)
    }

    pub async fn open(&self) -> Result<GameLog> {
        let game_id = self.game_id().await?;
        self.store.load(game_id)
    }

    /// Adds a note to the active game. Blank notes are refused before the
    /// store is touched.
    pub async fn submit(&mut self, text: &str) -> Result<GameLog> {
        if text.trim().is_empty() {
            return Err(GameLogError::EmptyInput);
        }

        let game_id = self.game_id().await?;
        let mut log = self.store.load(game_id)?;
        self.store.append(&mut log, text);
        self.store.save(&log)?;
        if let Some(entry) = log.last() {
            info!("Added entry {} to game {} ({} total)", entry.id, game_id, log.len());
        }
        Ok(log)
    }

    /// Deletes by 1-based position in the newest-first listing.
    pub async fn delete_at_display(&mut self, position: usize) -> Result<GameLog> {
        let game_id = self.game_id().await?;
        let mut log = self.store.load(game_id)?;
        match log.storage_index_for_display(position) {
            Some(index) => {
                self.store.remove_at(&mut log, index);
                self.store.save(&log)?;
                info!("Removed entry {} from game {}", position, game_id);
            }
            None => warn!(
                "No entry at position {} in game {} ({} entries)",
                position,
                game_id,
                log.len()
            ),
        }
        Ok(log)
    }

    pub async fn delete_by_id(&mut self, id: EntryId) -> Result<GameLog> {
        let game_id = self.game_id().await?;
        let mut log = self.store.load(game_id)?;
        let before = log.len();
        self.store.remove_by_id(&mut log, id);
        if log.len() != before {
            self.store.save(&log)?;
            info!("Removed entry {} from game {}", id, game_id);
        } else {
            warn!("No entry {} in game {}", id, game_id);
        }
        Ok(log)
    }
}
