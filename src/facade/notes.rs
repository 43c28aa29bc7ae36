use super::form::EntryForm;
use super::notice::{Notice, NoticeBoard, NoticeKind};
use crate::config::NotesConfig;
use crate::core::{Clock, Movie, NotesError, Result, SystemClock, average_of, parse_rating};
use crate::migration::MigrationReport;
use crate::photo::{DataUrlEncoder, PhotoEncoder, PhotoSource, encode_batch};
use crate::storage::{CollectionStore, FileStore, KeyValueStore};
use crate::view::{self, ListedMovie, Statistics};
use log::{debug, warn};
use std::sync::Arc;

pub const VALIDATION_MESSAGE: &str = "Fill in the name and both ratings correctly.";

/// Outcome of a successful create-or-update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upserted {
    pub position: usize,
    pub created: bool,
    pub average: f64,
}

/// The notebook: the in-memory working copy of the collection plus the
/// entry form, search term and notices around it.
///
/// The store is read by [`MovieNotes::load`] and fully rewritten after every
/// successful mutation.
pub struct MovieNotes {
    config: NotesConfig,
    collection: CollectionStore,
    encoder: Arc<dyn PhotoEncoder>,
    clock: Arc<dyn Clock>,
    movies: Vec<Movie>,
    form: EntryForm,
    search: String,
    notices: NoticeBoard,
}

impl MovieNotes {
    /// Creates an empty, not yet loaded notebook over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, config: NotesConfig) -> Self {
        let collection = CollectionStore::new(store, config.storage_key.clone());
        let notices = NoticeBoard::new(config.notice_ttl);
        Self {
            config,
            collection,
            encoder: Arc::new(DataUrlEncoder),
            clock: Arc::new(SystemClock),
            movies: Vec::new(),
            form: EntryForm::default(),
            search: String::new(),
            notices,
        }
    }

    /// Opens the file store in `config.data_dir` and loads from it.
    pub fn open(config: NotesConfig) -> Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        let mut notes = Self::new(Arc::new(store), config);
        notes.load()?;
        Ok(notes)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn PhotoEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Replaces the working copy with the stored collection, migrated to the
    /// current shape. Nothing is written back until the next mutation.
    pub fn load(&mut self) -> Result<MigrationReport> {
        let loaded = self.collection.load(&self.clock.today())?;
        self.movies = loaded.movies;
        self.form.clear();
        Ok(loaded.report)
    }

    /// Writes the whole working copy to the store.
    pub fn save(&self) -> Result<()> {
        self.collection.save(&self.movies)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Entries matching the current search term, in collection order.
    pub fn filtered(&self) -> Vec<ListedMovie<'_>> {
        view::filter_by_name(&self.movies, &self.search)
    }

    /// The filtered view ordered for display, newest first.
    pub fn listing(&self) -> Vec<ListedMovie<'_>> {
        view::display_order(self.filtered())
    }

    /// Aggregates over the whole collection, ignoring the search term.
    pub fn statistics(&self) -> Statistics {
        view::statistics(&self.movies)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.visible(self.clock.now())
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    // ========================================================================
    // Form
    // ========================================================================

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    /// Fills the form from the entry at `position` and targets it.
    pub fn begin_edit(&mut self, position: usize) -> bool {
        match self.movies.get(position) {
            Some(movie) => {
                self.form = EntryForm::editing(position, movie);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
    }

    /// Submits the form.
    ///
    /// Validation problems and a vanished edit target become an error
    /// notice and return `Ok(false)` without mutating anything. On success
    /// the form is cleared and a confirmation notice names the entry and its
    /// average.
    pub fn submit_form(&mut self) -> Result<bool> {
        let form = self.form.clone();
        let outcome = self.upsert(&form.name, &form.rating_a, &form.rating_b, form.edit_target());

        match outcome {
            Ok(done) => {
                let verb = if done.created { "Saved" } else { "Updated" };
                let text = format!("{}: {} ({})", verb, form.name.trim(), done.average);
                self.form.clear();
                self.notify(text, NoticeKind::Success);
                Ok(true)
            }
            Err(NotesError::Validation(_)) => {
                self.notify(VALIDATION_MESSAGE, NoticeKind::Error);
                Ok(false)
            }
            Err(NotesError::NotFound(position)) => {
                self.form.stop_editing();
                self.notify(
                    format!("Entry {} no longer exists.", position),
                    NoticeKind::Error,
                );
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    fn notify(&mut self, text: impl Into<String>, kind: NoticeKind) {
        let now = self.clock.now();
        self.notices.show(text, kind, now);
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Applies `apply` to the working copy and writes the result.
    ///
    /// When `apply` or the write fails the working copy is rewound to its
    /// state before the call, so memory never runs ahead of the store.
    fn commit<T, F>(&mut self, operation: &str, apply: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Movie>) -> Result<T>,
    {
        let rewind = self.movies.clone();
        let outcome = apply(&mut self.movies).and_then(|value| {
            self.collection.save(&self.movies)?;
            Ok(value)
        });

        if let Err(err) = &outcome {
            warn!("{} failed ({}); working copy rewound", operation, err);
            self.movies = rewind;
        }
        outcome
    }

    /// Creates an entry, or updates the one at `target`.
    ///
    /// Fails with `Validation` when the trimmed name is empty or a rating is
    /// not a number, and with `NotFound` when `target` is out of range.
    pub fn upsert(
        &mut self,
        name: &str,
        rating_a: &str,
        rating_b: &str,
        target: Option<usize>,
    ) -> Result<Upserted> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NotesError::Validation("name is empty".to_string()));
        }
        let a = parse_rating(rating_a).ok_or_else(|| {
            NotesError::Validation(format!("'{}' is not a rating", rating_a))
        })?;
        let b = parse_rating(rating_b).ok_or_else(|| {
            NotesError::Validation(format!("'{}' is not a rating", rating_b))
        })?;
        if !average_of(a, b).is_finite() {
            return Err(NotesError::Validation(format!(
                "average of {} and {} is out of range",
                a, b
            )));
        }

        if let Some(position) = target.filter(|&position| position >= self.movies.len()) {
            return Err(NotesError::NotFound(position));
        }

        let today = self.clock.today();
        let outcome = self.commit("upsert", |movies| match target {
            Some(position) => {
                let movie = movies
                    .get_mut(position)
                    .ok_or(NotesError::NotFound(position))?;
                movie.rerate(name, a, b, today);
                Ok(Upserted {
                    position,
                    created: false,
                    average: movie.average(),
                })
            }
            None => {
                let movie = Movie::new(name, a, b, today);
                let average = movie.average();
                movies.push(movie);
                Ok(Upserted {
                    position: movies.len() - 1,
                    created: true,
                    average,
                })
            }
        })?;

        debug!(
            "{} entry {} ('{}')",
            if outcome.created { "created" } else { "updated" },
            outcome.position,
            name
        );
        Ok(outcome)
    }

    /// Removes the entry at `position`. Returns `false` when there is none.
    pub fn delete(&mut self, position: usize) -> Result<bool> {
        if position >= self.movies.len() {
            debug!("delete ignored: no entry at {}", position);
            return Ok(false);
        }
        let removed = self.commit("delete", |movies| Ok(movies.remove(position)))?;
        self.form.entry_removed(position);
        debug!("deleted entry {} ('{}')", position, removed.name());
        Ok(true)
    }

    /// Converts every source and appends all of them to the entry at
    /// `position` in one mutation, once the whole batch has converted.
    ///
    /// Returns the number of photos added. Nothing is changed when the batch
    /// is empty, the entry does not exist, or any conversion fails.
    pub async fn attach_photos(&mut self, position: usize, sources: Vec<PhotoSource>) -> Result<usize> {
        if sources.is_empty() {
            return Ok(0);
        }
        if position >= self.movies.len() {
            debug!("photo attach ignored: no entry at {}", position);
            return Ok(0);
        }

        let encoded = encode_batch(self.encoder.as_ref(), sources).await?;
        let added = encoded.len();

        let total = self.commit("photo attach", |movies| {
            let movie = movies
                .get_mut(position)
                .ok_or(NotesError::NotFound(position))?;
            movie.push_photos(encoded);
            Ok(movie.photos().len())
        })?;
        debug!(
            "attached {} photos to entry {} (now {})",
            added, position, total
        );
        Ok(added)
    }

    /// Removes one photo. Returns `false` when the entry or photo is absent.
    pub fn remove_photo(&mut self, position: usize, photo: usize) -> Result<bool> {
        let present = self
            .movies
            .get(position)
            .is_some_and(|movie| photo < movie.photos().len());
        if !present {
            debug!("photo removal ignored: no photo {} on entry {}", photo, position);
            return Ok(false);
        }
        self.commit("photo removal", |movies| {
            movies
                .get_mut(position)
                .and_then(|movie| movie.remove_photo(photo))
                .ok_or(NotesError::NotFound(position))
        })?;
        debug!("removed photo {} from entry {}", photo, position);
        Ok(true)
    }
}
