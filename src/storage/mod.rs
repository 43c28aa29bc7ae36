pub mod collection;
pub mod engine;
pub mod file;
pub mod memory;

pub use collection::{CollectionStore, LoadedCollection};
pub use engine::KeyValueStore;
pub use file::FileStore;
pub use memory::InMemoryStore;
