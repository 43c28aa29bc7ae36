use crate::core::{Movie, format_rating};

/// The entry form: a name, two rating texts and an optional edit target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub name: String,
    pub rating_a: String,
    pub rating_b: String,
    edit_target: Option<usize>,
}

impl EntryForm {
    pub fn new(name: &str, rating_a: &str, rating_b: &str) -> Self {
        Self {
            name: name.to_string(),
            rating_a: rating_a.to_string(),
            rating_b: rating_b.to_string(),
            edit_target: None,
        }
    }

    /// Form pre-filled from an existing entry, targeting its position.
    pub fn editing(position: usize, movie: &Movie) -> Self {
        Self {
            name: movie.name().to_string(),
            rating_a: format_rating(movie.rating_a()),
            rating_b: format_rating(movie.rating_b()),
            edit_target: Some(position),
        }
    }

    pub fn edit_target(&self) -> Option<usize> {
        self.edit_target
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    pub fn action_label(&self) -> &'static str {
        if self.is_editing() { "Update" } else { "Save" }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn stop_editing(&mut self) {
        self.edit_target = None;
    }

    /// Keeps the edit target pointing at the same entry after the entry at
    /// `removed` was deleted.
    pub(crate) fn entry_removed(&mut self, removed: usize) {
        self.edit_target = match self.edit_target {
            Some(target) if target == removed => None,
            Some(target) if target > removed => Some(target - 1),
            other => other,
        };
    }
}
