//! Derived, non-persisted projections of the collection.

pub mod filter;
pub mod ordering;
pub mod stats;

pub use filter::{EmptyView, ListedMovie, filter_by_name};
pub use ordering::{display_order, sort_date};
pub use stats::{Mean, Statistics, statistics};
