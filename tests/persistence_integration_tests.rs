//! Integration tests for the file-backed store and load-time migration

use chrono::NaiveDate;
use movienotes::{
    FileStore, FixedClock, KeyValueStore, MovieNotes, NotesConfig, storage::CollectionStore,
};
use std::sync::Arc;
use tempfile::TempDir;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()))
}

#[test]
fn test_notes_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = NotesConfig::new().data_dir(temp_dir.path());

    {
        let mut notes = MovieNotes::open(config.clone()).unwrap();
        notes.upsert("Dune", "8", "9", None).unwrap();
        notes.upsert("Heat", "9,5", "9", None).unwrap();
        notes.delete(0).unwrap();
    }

    let notes = MovieNotes::open(config).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes.get(0).unwrap().name(), "Heat");
    assert_eq!(notes.get(0).unwrap().average(), 9.25);
    assert!(temp_dir.path().join("movies.json").exists());
}

#[test]
fn test_storage_key_selects_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = NotesConfig::new()
        .data_dir(temp_dir.path())
        .storage_key("filmes");

    let mut notes = MovieNotes::open(config).unwrap();
    notes.upsert("Dune", "8", "9", None).unwrap();

    assert!(temp_dir.path().join("filmes.json").exists());
    assert!(!temp_dir.path().join("movies.json").exists());
}

#[test]
fn test_browser_export_is_migrated_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
    store
        .set(
            "movies",
            r#"[
                {"nome":"Cidade de Deus","notaDel":9.5,"notaEttore":9,"media":9.25,"foto":"data:image/png;base64,AA=="},
                {"nome":"Central do Brasil","notaDel":8,"notaEttore":8,"media":8,"fotos":[],"dataCriacao":"02/03/2024"}
            ]"#,
        )
        .unwrap();

    let mut notes = MovieNotes::new(store.clone(), NotesConfig::default()).with_clock(clock());
    let report = notes.load().unwrap();

    assert_eq!(report.upgraded, 1);
    assert_eq!(report.current, 1);
    let first = notes.get(0).unwrap();
    assert_eq!(first.name(), "Cidade de Deus");
    assert_eq!(first.photos(), ["data:image/png;base64,AA==".to_string()]);
    assert_eq!(first.created_at(), "19/10/2026");
    assert_eq!(notes.get(1).unwrap().created_at(), "02/03/2024");

    // The next mutation writes the current shape.
    notes.remove_photo(0, 0).unwrap();
    let blob = store.get("movies").unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(stored[0]["name"], "Cidade de Deus");
    assert_eq!(stored[0]["createdAt"], "19/10/2026");
    assert!(stored[0].get("foto").is_none());
    assert!(stored[0].get("nome").is_none());
    assert_eq!(stored[1]["ratingA"], 8.0);
}

#[test]
fn test_unreadable_file_is_kept_aside() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("movies.json"), "definitely not json").unwrap();

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(temp_dir.path()).unwrap());
    let loaded = CollectionStore::new(store, "movies")
        .load("19/10/2026")
        .unwrap();

    assert!(loaded.movies.is_empty());
    assert_eq!(loaded.quarantined_to.as_deref(), Some("movies.corrupt"));
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("movies.corrupt.json")).unwrap(),
        "definitely not json"
    );
}

#[test]
fn test_reopening_preserves_insertion_order_and_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let config = NotesConfig::new().data_dir(temp_dir.path());

    let mut notes = MovieNotes::open(config.clone()).unwrap();
    for (name, a, b) in [("Dune", "8", "9"), ("Dune", "5", "5"), ("Alien", "9", "9")] {
        notes.upsert(name, a, b, None).unwrap();
    }

    let reopened = MovieNotes::open(config).unwrap();
    let averages: Vec<f64> = reopened.movies().iter().map(|m| m.average()).collect();
    assert_eq!(averages, vec![8.5, 5.0, 9.0]);
}
