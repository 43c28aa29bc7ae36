use super::KeyValueStore;
use crate::core::{Movie, NotesError, Result};
use crate::migration::{MigrationReport, migrate_blob};
use log::{debug, warn};
use std::sync::Arc;

/// Result of reading the collection from the store.
#[derive(Debug, Clone, Default)]
pub struct LoadedCollection {
    pub movies: Vec<Movie>,
    pub report: MigrationReport,
    /// Set when the stored blob could not be decoded and was moved aside.
    pub quarantined_to: Option<String>,
}

/// Reads and writes the whole collection as one JSON array under one key.
#[derive(Clone)]
pub struct CollectionStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CollectionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Base key under which an undecodable blob is preserved.
    pub fn quarantine_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }

    /// First quarantine key not already holding an earlier blob:
    /// `<key>.corrupt`, then `<key>.corrupt.1`, `<key>.corrupt.2`, ...
    fn free_quarantine_key(&self) -> Result<String> {
        let base = self.quarantine_key();
        if !self.store.contains(&base)? {
            return Ok(base);
        }
        let mut attempt = 1usize;
        loop {
            let candidate = format!("{}.{}", base, attempt);
            if !self.store.contains(&candidate)? {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }

    /// Loads the collection and runs the migration pass over it.
    ///
    /// A missing key is an empty collection. A blob that is not a JSON array
    /// of records is copied to a free quarantine key (earlier quarantined
    /// blobs are never overwritten) and the collection starts empty; the bad
    /// blob is overwritten by the next save.
    pub fn load(&self, today: &str) -> Result<LoadedCollection> {
        let Some(blob) = self.store.get(&self.key)? else {
            debug!("no stored collection under '{}'", self.key);
            return Ok(LoadedCollection::default());
        };

        match migrate_blob(&blob, today) {
            Ok((movies, report)) => {
                debug!(
                    "loaded {} entries from '{}' ({} upgraded, {} dropped)",
                    movies.len(),
                    self.key,
                    report.upgraded,
                    report.dropped
                );
                Ok(LoadedCollection {
                    movies,
                    report,
                    quarantined_to: None,
                })
            }
            Err(NotesError::Serialization(reason)) => {
                let quarantine = self.free_quarantine_key()?;
                warn!(
                    "stored collection under '{}' is unreadable ({}); moved to '{}'",
                    self.key, reason, quarantine
                );
                self.store.set(&quarantine, &blob)?;
                Ok(LoadedCollection {
                    quarantined_to: Some(quarantine),
                    ..LoadedCollection::default()
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Replaces the stored collection with `movies`.
    pub fn save(&self, movies: &[Movie]) -> Result<()> {
        let blob = serde_json::to_string(movies)?;
        self.store.set(&self.key, &blob)?;
        debug!("saved {} entries under '{}'", movies.len(), self.key);
        Ok(())
    }
}
