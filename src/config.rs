use log::warn;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORAGE_KEY: &str = "movies";
pub const DEFAULT_DATA_DIR: &str = "movienotes_data";
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(3500);

/// Notebook configuration
#[derive(Debug, Clone, PartialEq)]
pub struct NotesConfig {
    /// Directory of the file-backed store
    pub data_dir: PathBuf,

    /// Key holding the serialized collection
    pub storage_key: String,

    /// How long a notice stays visible
    pub notice_ttl: Duration,

    /// Label of the first rating
    pub rater_a_label: String,

    /// Label of the second rating
    pub rater_b_label: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notice_ttl: DEFAULT_NOTICE_TTL,
            rater_a_label: "Del".to_string(),
            rater_b_label: "Ettore".to_string(),
        }
    }
}

impl NotesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `MOVIENOTES_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("MOVIENOTES_DATA_DIR").filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup("MOVIENOTES_STORAGE_KEY").filter(|v| !v.is_empty()) {
            config.storage_key = key;
        }
        if let Some(raw) = lookup("MOVIENOTES_NOTICE_TTL_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.notice_ttl = Duration::from_millis(ms),
                Err(e) => warn!("ignoring MOVIENOTES_NOTICE_TTL_MS='{}': {}", raw, e),
            }
        }
        if let Some(label) = lookup("MOVIENOTES_RATER_A").filter(|v| !v.is_empty()) {
            config.rater_a_label = label;
        }
        if let Some(label) = lookup("MOVIENOTES_RATER_B").filter(|v| !v.is_empty()) {
            config.rater_b_label = label;
        }

        config
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the storage key
    pub fn storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    /// Set the notice lifetime
    pub fn notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// Set both rater labels
    pub fn rater_labels(mut self, first: &str, second: &str) -> Self {
        self.rater_a_label = first.to_string();
        self.rater_b_label = second.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = NotesConfig::default();
        assert_eq!(config.storage_key, "movies");
        assert_eq!(config.notice_ttl, Duration::from_millis(3500));
        assert_eq!(config.rater_a_label, "Del");
        assert_eq!(config.rater_b_label, "Ettore");
    }

    #[test]
    fn test_builder() {
        let config = NotesConfig::new()
            .data_dir("/tmp/notes")
            .storage_key("filmes")
            .notice_ttl(Duration::from_secs(1))
            .rater_labels("Ana", "Bia");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(config.storage_key, "filmes");
        assert_eq!(config.notice_ttl, Duration::from_secs(1));
        assert_eq!(config.rater_b_label, "Bia");
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MOVIENOTES_DATA_DIR", "/var/lib/notes"),
            ("MOVIENOTES_STORAGE_KEY", "filmes"),
            ("MOVIENOTES_NOTICE_TTL_MS", "1200"),
            ("MOVIENOTES_RATER_A", ""),
        ]
        .into_iter()
        .collect();

        let config = NotesConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/notes"));
        assert_eq!(config.storage_key, "filmes");
        assert_eq!(config.notice_ttl, Duration::from_millis(1200));
        assert_eq!(config.rater_a_label, "Del");
    }

    #[test]
    fn test_bad_ttl_is_ignored() {
        let config = NotesConfig::from_lookup(|name| {
            (name == "MOVIENOTES_NOTICE_TTL_MS").then(|| "soon".to_string())
        });
        assert_eq!(config.notice_ttl, DEFAULT_NOTICE_TTL);
    }
}
