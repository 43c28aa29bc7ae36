// ============================================================================
// MovieNotes Library
// ============================================================================

pub mod config;
pub mod core;
pub mod facade;
pub mod migration;
pub mod photo;
pub mod storage;
pub mod view;

// Re-export main types for convenience
pub use config::NotesConfig;
pub use core::{Clock, FixedClock, Movie, NotesError, Result, SystemClock, parse_rating};
pub use facade::{EntryForm, MovieNotes, Notice, NoticeKind, Upserted};
pub use migration::{LegacyMovie, MigrationReport, StoredRecord};
pub use photo::{DataUrlEncoder, PhotoEncoder, PhotoSource};
pub use storage::{CollectionStore, FileStore, InMemoryStore, KeyValueStore};
pub use view::{ListedMovie, Mean, Statistics};
