use movienotes::view::{EmptyView, ListedMovie, Statistics};
use movienotes::NotesConfig;

pub fn render_listing(listing: &[ListedMovie<'_>], search: &str, config: &NotesConfig) -> String {
    if listing.is_empty() {
        return EmptyView::for_term(search).message().to_string();
    }

    listing
        .iter()
        .map(|entry| {
            let movie = entry.movie;
            let mut line = format!(
                "[{}] {}  {}  {} | {}: {} | {}: {}",
                entry.position,
                movie.name(),
                movie.created_at(),
                movie.average(),
                config.rater_a_label,
                movie.rating_a(),
                config.rater_b_label,
                movie.rating_b()
            );
            if !movie.photos().is_empty() {
                line.push_str(&format!("  ({} photos)", movie.photos().len()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_statistics(stats: &Statistics, config: &NotesConfig) -> String {
    format!(
        "Total movies: {}\nOverall average: {}\n{} average: {}\n{} average: {}",
        stats.count,
        stats.mean_average,
        config.rater_a_label,
        stats.mean_rating_a,
        config.rater_b_label,
        stats.mean_rating_b
    )
}
