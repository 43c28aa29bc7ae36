pub mod date;
pub mod error;
pub mod types;

pub use date::{Clock, FixedClock, SystemClock, format_display_date, parse_display_date};
pub use error::{NotesError, Result};
pub use types::{Movie, average_of, format_rating, parse_rating};
