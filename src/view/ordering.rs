use super::ListedMovie;
use crate::core::Movie;
use crate::core::date::{fallback_sort_date, parse_display_date};
use chrono::NaiveDate;

/// Creation date used for ordering; unreadable dates count as 1900-01-01.
pub fn sort_date(movie: &Movie) -> NaiveDate {
    parse_display_date(movie.created_at()).unwrap_or_else(fallback_sort_date)
}

/// Newest first by creation date. Equal dates keep their relative order.
pub fn display_order(mut view: Vec<ListedMovie<'_>>) -> Vec<ListedMovie<'_>> {
    view.sort_by(|a, b| sort_date(b.movie).cmp(&sort_date(a.movie)));
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::filter_by_name;

    fn names<'a>(view: &[ListedMovie<'a>]) -> Vec<&'a str> {
        view.iter().map(|entry| entry.movie.name()).collect()
    }

    #[test]
    fn test_newest_first() {
        let movies = vec![
            Movie::new("Older", 1.0, 1.0, "01/01/2023"),
            Movie::new("Newer", 1.0, 1.0, "10/05/2024"),
        ];
        let ordered = display_order(filter_by_name(&movies, ""));
        assert_eq!(names(&ordered), ["Newer", "Older"]);
        assert_eq!(ordered[0].position, 1);
    }

    #[test]
    fn test_unparseable_dates_sort_last() {
        let movies = vec![
            Movie::new("Unknown", 1.0, 1.0, "sometime"),
            Movie::new("Dated", 1.0, 1.0, "01/01/1999"),
            Movie::new("Blank", 1.0, 1.0, ""),
        ];
        let ordered = display_order(filter_by_name(&movies, ""));
        assert_eq!(names(&ordered), ["Dated", "Unknown", "Blank"]);
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let movies = vec![
            Movie::new("First", 1.0, 1.0, "10/05/2024"),
            Movie::new("Second", 1.0, 1.0, "10/05/2024"),
            Movie::new("Third", 1.0, 1.0, "11/05/2024"),
            Movie::new("Fourth", 1.0, 1.0, "10/05/2024"),
        ];
        let ordered = display_order(filter_by_name(&movies, ""));
        assert_eq!(names(&ordered), ["Third", "First", "Second", "Fourth"]);
    }

    #[test]
    fn test_dates_before_fallback_still_sort_below_it() {
        let movies = vec![
            Movie::new("Ancient", 1.0, 1.0, "01/01/1850"),
            Movie::new("Unknown", 1.0, 1.0, "?"),
        ];
        let ordered = display_order(filter_by_name(&movies, ""));
        assert_eq!(names(&ordered), ["Unknown", "Ancient"]);
    }
}
