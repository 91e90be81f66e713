pub mod json;
pub mod sqlite;

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::{Inbox, Match, MatchLocation, Tournament};

pub use json::JsonFileStore;
pub use sqlite::SqliteStore;

/// Persistence for tournaments and the inbox. Callers never learn which
/// backend is active.
pub trait TournamentStore: Send + Sync {
    /// Real tournaments in entry order; never includes the inbox
    fn list(&self) -> Result<Vec<Tournament>>;

    fn get_by_id(&self, id: &str) -> Result<Option<Tournament>>;

    /// Creates the tournament or replaces the one with the same id
    fn save(&self, tournament: &Tournament) -> Result<()>;

    fn delete(&self, id: &str) -> Result<()>;

    fn inbox(&self) -> Result<Inbox>;

    fn save_inbox(&self, inbox: &Inbox) -> Result<()>;

    /// Runs `edit` on the matches of one container and persists them when it
    /// returns true, all under a single lock or transaction. Returns false
    /// when the container does not exist or `edit` made no change.
    fn edit_matches(
        &self,
        location: &MatchLocation,
        edit: &mut dyn FnMut(&mut Vec<Match>) -> bool,
    ) -> Result<bool>;

    /// Removes the match from `from` and appends it to `to` as one unit.
    /// Returns false, changing nothing, when either container or the match
    /// does not exist.
    fn move_match(&self, match_id: &str, from: &MatchLocation, to: &MatchLocation) -> Result<bool>;
}

pub fn open_store(settings: &StorageSettings) -> Result<Arc<dyn TournamentStore>> {
    match settings.backend {
        StorageBackend::Json => {
            info!("Using JSON file store at {}", settings.json_path.display());
            Ok(Arc::new(JsonFileStore::open(&settings.json_path)?))
        }
        StorageBackend::Sqlite => {
            info!("Using SQLite store at {}", settings.sqlite_path.display());
            Ok(Arc::new(SqliteStore::open(&settings.sqlite_path)?))
        }
    }
}

/// Tournament ids must not collide with the legacy inbox marker
pub(crate) fn ensure_regular_id(id: &str) -> Result<()> {
    if id == crate::domain::LEGACY_INBOX_ID {
        anyhow::bail!("Tournament id {} is reserved for the inbox", id);
    }
    if id.is_empty() {
        anyhow::bail!("Tournament id must not be empty");
    }
    Ok(())
}
