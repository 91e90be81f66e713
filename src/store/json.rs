use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::{take_match, Inbox, Match, MatchLocation, Tournament, LEGACY_INBOX_ID};

use super::{ensure_regular_id, TournamentStore};

/// On-disk layout of the data file
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    inbox: Inbox,
    #[serde(default)]
    tournaments: Vec<Tournament>,
}

/// Older files are a bare array with the inbox stored as a tournament.
/// Legacy goes first: a derived struct also accepts sequences.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Legacy(Vec<Tournament>),
    Current(Document),
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        match stored {
            StoredDocument::Current(doc) => doc,
            StoredDocument::Legacy(all) => split_legacy_inbox(all),
        }
    }
}

fn split_legacy_inbox(all: Vec<Tournament>) -> Document {
    let mut doc = Document::default();
    for tournament in all {
        if tournament.id == LEGACY_INBOX_ID {
            doc.inbox.matches.extend(tournament.matches);
        } else {
            doc.tournaments.push(tournament);
        }
    }
    doc
}

impl Document {
    fn container_mut(&mut self, location: &MatchLocation) -> Option<&mut Vec<Match>> {
        match location {
            MatchLocation::Inbox => Some(&mut self.inbox.matches),
            MatchLocation::Tournament(id) => self
                .tournaments
                .iter_mut()
                .find(|t| &t.id == id)
                .map(|t| &mut t.matches),
        }
    }

    fn has_container(&self, location: &MatchLocation) -> bool {
        match location {
            MatchLocation::Inbox => true,
            MatchLocation::Tournament(id) => self.tournaments.iter().any(|t| &t.id == id),
        }
    }
}

/// Whole-file JSON store. Every mutation rewrites the file through a temp
/// file and rename, so readers never see a half-written document.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("Failed to create data directory")?;
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };

        if !store.path.exists() {
            store.write_document(&Document::default())?;
            info!("Created empty data file: {}", store.path.display());
        }

        Ok(store)
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| anyhow::anyhow!("JSON store lock poisoned"))
    }

    fn read_document(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::default());
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read data file {}", self.path.display()))?;
        let stored: StoredDocument = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                self.path,
                json.chars().take(200).collect::<String>()
            )
        })?;

        Ok(stored.into())
    }

    fn write_document(&self, doc: &Document) -> Result<()> {
        let json = serde_json::to_string_pretty(doc).context("Failed to serialize data file")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, json).context("Failed to write temp data file")?;
        fs::rename(&temp_path, &self.path).context("Failed to replace data file")?;

        debug!("Wrote data file: {}", self.path.display());
        Ok(())
    }

    fn update<F, T>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> (T, bool),
    {
        let _guard = self.guard()?;
        let mut doc = self.read_document()?;
        let (result, changed) = mutate(&mut doc);
        if changed {
            self.write_document(&doc)?;
        }
        Ok(result)
    }
}

impl TournamentStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Tournament>> {
        let _guard = self.guard()?;
        let tournaments = self.read_document()?.tournaments;
        debug!("Loaded {} tournaments from {}", tournaments.len(), self.path.display());
        Ok(tournaments)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Tournament>> {
        let _guard = self.guard()?;
        let doc = self.read_document()?;
        Ok(doc.tournaments.into_iter().find(|t| t.id == id))
    }

    fn save(&self, tournament: &Tournament) -> Result<()> {
        ensure_regular_id(&tournament.id)?;

        self.update(|doc| {
            match doc.tournaments.iter_mut().find(|t| t.id == tournament.id) {
                Some(existing) => *existing = tournament.clone(),
                None => doc.tournaments.push(tournament.clone()),
            }
            ((), true)
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.update(|doc| {
            let before = doc.tournaments.len();
            doc.tournaments.retain(|t| t.id != id);
            ((), doc.tournaments.len() != before)
        })
    }

    fn inbox(&self) -> Result<Inbox> {
        let _guard = self.guard()?;
        Ok(self.read_document()?.inbox)
    }

    fn save_inbox(&self, inbox: &Inbox) -> Result<()> {
        self.update(|doc| {
            doc.inbox = inbox.clone();
            ((), true)
        })
    }

    fn edit_matches(
        &self,
        location: &MatchLocation,
        edit: &mut dyn FnMut(&mut Vec<Match>) -> bool,
    ) -> Result<bool> {
        self.update(|doc| match doc.container_mut(location) {
            Some(matches) => {
                let changed = edit(matches);
                (changed, changed)
            }
            None => (false, false),
        })
    }

    fn move_match(&self, match_id: &str, from: &MatchLocation, to: &MatchLocation) -> Result<bool> {
        if from == to {
            return Ok(false);
        }

        self.update(|doc| {
            if !doc.has_container(to) {
                return (false, false);
            }
            let Some(moved) = doc
                .container_mut(from)
                .and_then(|source| take_match(source, match_id))
            else {
                return (false, false);
            };
            match doc.container_mut(to) {
                Some(target) => target.push(moved),
                None => return (false, false),
            }
            (true, true)
        })
    }
}
