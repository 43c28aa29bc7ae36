//! File-backed store: one JSON file per key inside a data directory.

use super::KeyValueStore;
use crate::core::{NotesError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{Level, event};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the data directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            NotesError::Storage(format!(
                "Failed to create data directory '{}': {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NotesError::Storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let mut temp = NamedTempFile::new_in(&self.root).map_err(|e| {
            NotesError::Storage(format!("Failed to create temp file: {}", e))
        })?;
        temp.write_all(value.as_bytes())
            .map_err(|e| NotesError::Storage(format!("Failed to write temp file: {}", e)))?;
        temp.flush()
            .map_err(|e| NotesError::Storage(format!("Failed to flush temp file: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| NotesError::Storage(format!("Failed to sync temp file: {}", e)))?;
        temp.persist(&path).map_err(|e| {
            NotesError::Storage(format!(
                "Failed to replace '{}': {}",
                path.display(),
                e.error
            ))
        })?;

        event!(Level::DEBUG, key, bytes = value.len(), "store value replaced");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NotesError::Storage(format!(
                "Failed to delete '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(NotesError::InvalidKey(key.to_string()))
    }
}
