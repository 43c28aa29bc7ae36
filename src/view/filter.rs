use crate::core::Movie;

/// An entry of a derived view together with its position in the collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListedMovie<'a> {
    pub position: usize,
    pub movie: &'a Movie,
}

/// Entries whose name contains `term`, ignoring case, in collection order.
///
/// A blank term selects every entry.
pub fn filter_by_name<'a>(movies: &'a [Movie], term: &str) -> Vec<ListedMovie<'a>> {
    let listed = movies
        .iter()
        .enumerate()
        .map(|(position, movie)| ListedMovie { position, movie });

    if term.trim().is_empty() {
        return listed.collect();
    }

    let needle = term.to_lowercase();
    listed
        .filter(|entry| entry.movie.name().to_lowercase().contains(&needle))
        .collect()
}

/// Why a derived view is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyView {
    NothingSaved,
    NoMatches,
}

impl EmptyView {
    pub fn for_term(term: &str) -> Self {
        if term.trim().is_empty() {
            EmptyView::NothingSaved
        } else {
            EmptyView::NoMatches
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EmptyView::NothingSaved => "No movies saved yet.",
            EmptyView::NoMatches => "No movies found.",
        }
    }
}
