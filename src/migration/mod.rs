//! Upgrade of loaded records to the current [`Movie`] shape.
//!
//! Every element of a stored collection is decoded into a [`StoredRecord`]:
//! either already in the current shape, in an older shape that is repaired
//! field by field, or not a record at all. [`migrate`] turns the whole list
//! into current entries without reordering them.

mod legacy;

pub use legacy::LegacyMovie;

use crate::core::{Movie, Result};
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One element of a stored collection, as found on load.
///
/// Only JSON objects are records. Anything else, arrays included, is
/// `Malformed`.
#[derive(Debug, Clone)]
pub enum StoredRecord {
    Current(Movie),
    Legacy(LegacyMovie),
    Malformed(Value),
}

impl<'de> Deserialize<'de> for StoredRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(StoredRecord::classify)
    }
}

impl StoredRecord {
    /// Converts to the current shape. `today` fills a missing creation date.
    ///
    /// Returns `None` only when the element carries no fields at all
    /// (not a JSON object).
    pub fn upgrade(self, today: &str) -> Option<Movie> {
        match self {
            StoredRecord::Current(mut movie) => {
                if movie.created_at().trim().is_empty() {
                    movie.backfill_created_at(today);
                }
                Some(movie)
            }
            StoredRecord::Legacy(legacy) => Some(legacy.upgrade(today)),
            StoredRecord::Malformed(_) => None,
        }
    }

    fn classify(value: Value) -> Self {
        if !value.is_object() {
            return StoredRecord::Malformed(value);
        }
        if let Ok(movie) = Movie::deserialize(&value) {
            return StoredRecord::Current(movie);
        }
        match LegacyMovie::deserialize(&value) {
            Ok(legacy) => StoredRecord::Legacy(legacy),
            Err(_) => StoredRecord::Malformed(value),
        }
    }
}

/// Counters describing what a migration pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub current: usize,
    pub upgraded: usize,
    pub dropped: usize,
}

impl MigrationReport {
    pub fn changed_anything(&self) -> bool {
        self.upgraded > 0 || self.dropped > 0
    }
}

/// Runs the migration pass over decoded records, preserving order.
pub fn migrate(records: Vec<StoredRecord>, today: &str) -> (Vec<Movie>, MigrationReport) {
    let mut report = MigrationReport::default();
    let mut movies = Vec::with_capacity(records.len());

    for (position, record) in records.into_iter().enumerate() {
        match &record {
            StoredRecord::Current(movie) if !movie.created_at().trim().is_empty() => {
                report.current += 1;
            }
            StoredRecord::Malformed(value) => {
                report.dropped += 1;
                warn!(
                    "dropping stored element at position {}: not a record ({})",
                    position, value
                );
            }
            _ => {
                report.upgraded += 1;
                debug!("upgrading stored record at position {}", position);
            }
        }

        if let Some(movie) = record.upgrade(today) {
            movies.push(movie);
        }
    }

    (movies, report)
}

/// Decodes a serialized collection and migrates it.
pub fn migrate_blob(blob: &str, today: &str) -> Result<(Vec<Movie>, MigrationReport)> {
    let records: Vec<StoredRecord> = serde_json::from_str(blob)?;
    Ok(migrate(records, today))
}
