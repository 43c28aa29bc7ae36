//! Photo attachment: batches are applied all at once or not at all

use async_trait::async_trait;
use chrono::NaiveDate;
use movienotes::{
    FixedClock, InMemoryStore, KeyValueStore, MovieNotes, NotesConfig, NotesError, PhotoEncoder,
    PhotoSource, Result,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Store that remembers every value written under any key.
#[derive(Default)]
struct RecordingStore {
    inner: InMemoryStore,
    writes: Mutex<Vec<String>>,
}

impl RecordingStore {
    fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    fn photo_counts(&self) -> Vec<usize> {
        self.writes()
            .iter()
            .map(|blob| {
                let value: serde_json::Value = serde_json::from_str(blob).unwrap();
                value[0]["photos"].as_array().unwrap().len()
            })
            .collect()
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.lock().unwrap().push(value.to_string());
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

/// Encoder whose conversions finish only when the test releases them.
/// The first byte of a source selects its gate.
#[derive(Default)]
struct GatedEncoder {
    gates: Mutex<HashMap<u8, oneshot::Receiver<()>>>,
}

impl GatedEncoder {
    fn gate(&self, id: u8) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(id, rx);
        tx
    }
}

#[async_trait]
impl PhotoEncoder for GatedEncoder {
    async fn encode(&self, source: PhotoSource) -> Result<String> {
        let id = source.bytes[0];
        let gate = self.gates.lock().unwrap().remove(&id);
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| NotesError::PhotoConversion(format!("gate {} dropped", id)))?;
        }
        Ok(format!("photo-{}", id))
    }
}

fn notebook(store: Arc<RecordingStore>, encoder: Arc<dyn PhotoEncoder>) -> MovieNotes {
    let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()));
    let mut notes = MovieNotes::new(store, NotesConfig::default())
        .with_clock(clock)
        .with_encoder(encoder);
    notes.load().unwrap();
    notes
}

#[tokio::test]
async fn test_batch_is_applied_once_after_all_conversions() {
    let store = Arc::new(RecordingStore::default());
    let encoder = Arc::new(GatedEncoder::default());
    let first = encoder.gate(1);
    let second = encoder.gate(2);

    let mut notes = notebook(store.clone(), encoder.clone());
    notes.upsert("Dune", "8", "9", None).unwrap();
    assert_eq!(store.writes().len(), 1);

    let sources = vec![PhotoSource::new(vec![1]), PhotoSource::new(vec![2])];
    let observer = store.clone();

    let (attached, writes_while_pending) = tokio::join!(notes.attach_photos(0, sources), async move {
        // Let the second conversion finish while the first is still pending.
        second.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let writes = observer.writes().len();
        first.send(()).unwrap();
        writes
    });

    assert_eq!(attached.unwrap(), 2);
    assert_eq!(writes_while_pending, 1);
    assert_eq!(store.photo_counts(), vec![0, 2]);
    assert_eq!(notes.get(0).unwrap().photos(), ["photo-1".to_string(), "photo-2".to_string()]);
}

#[tokio::test]
async fn test_failed_conversion_leaves_entry_untouched() {
    let store = Arc::new(RecordingStore::default());
    let encoder = Arc::new(GatedEncoder::default());
    let ok = encoder.gate(1);
    let broken = encoder.gate(2);

    let mut notes = notebook(store.clone(), encoder.clone());
    notes.upsert("Dune", "8", "9", None).unwrap();

    ok.send(()).unwrap();
    drop(broken);

    let result = notes
        .attach_photos(0, vec![PhotoSource::new(vec![1]), PhotoSource::new(vec![2])])
        .await;

    assert!(matches!(result, Err(NotesError::PhotoConversion(_))));
    assert!(notes.get(0).unwrap().photos().is_empty());
    assert_eq!(store.writes().len(), 1);
}

#[tokio::test]
async fn test_attach_to_missing_entry_or_empty_batch_is_noop() {
    let store = Arc::new(RecordingStore::default());
    let mut notes = notebook(store.clone(), Arc::new(GatedEncoder::default()));

    assert_eq!(notes.attach_photos(3, vec![PhotoSource::new(vec![1])]).await.unwrap(), 0);

    notes.upsert("Dune", "8", "9", None).unwrap();
    assert_eq!(notes.attach_photos(0, Vec::new()).await.unwrap(), 0);
    assert_eq!(store.writes().len(), 1);
}

#[tokio::test]
async fn test_photos_append_in_order_and_remove_by_position() {
    let store = Arc::new(RecordingStore::default());
    let mut notes = notebook(store.clone(), Arc::new(GatedEncoder::default()));
    notes.upsert("Dune", "8", "9", None).unwrap();

    notes.attach_photos(0, vec![PhotoSource::new(vec![7])]).await.unwrap();
    notes
        .attach_photos(0, vec![PhotoSource::new(vec![8]), PhotoSource::new(vec![9])])
        .await
        .unwrap();
    assert_eq!(notes.get(0).unwrap().photos().len(), 3);

    assert!(notes.remove_photo(0, 1).unwrap());
    assert!(!notes.remove_photo(0, 2).unwrap());

    assert_eq!(
        notes.get(0).unwrap().photos(),
        ["photo-7".to_string(), "photo-9".to_string()]
    );
    assert_eq!(store.photo_counts(), vec![0, 1, 3, 2]);
}

#[tokio::test]
async fn test_data_url_encoder_end_to_end() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let png = temp_dir.path().join("poster.png");
    let gif = temp_dir.path().join("still");
    std::fs::write(&png, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
    std::fs::write(&gif, b"GIF89a").unwrap();

    let store = Arc::new(RecordingStore::default());
    let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()));
    let mut notes = MovieNotes::new(store, NotesConfig::default()).with_clock(clock);
    notes.upsert("Dune", "8", "9", None).unwrap();

    let sources = vec![
        PhotoSource::from_path(&png).await.unwrap(),
        PhotoSource::from_path(&gif).await.unwrap(),
    ];
    notes.attach_photos(0, sources).await.unwrap();

    let photos = notes.get(0).unwrap().photos();
    assert_eq!(photos[0], "data:image/png;base64,iVBORw0KGgo=");
    assert!(photos[1].starts_with("data:image/gif;base64,"));
}
