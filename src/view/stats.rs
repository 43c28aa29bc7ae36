use crate::core::Movie;
use std::fmt;

/// A mean rounded to one decimal, or the "no data" marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mean {
    NoData,
    Value(f64),
}

impl Mean {
    fn of<I>(values: I, count: usize) -> Self
    where
        I: Iterator<Item = f64> + Clone,
    {
        if count == 0 {
            return Mean::NoData;
        }
        let divisor = count as f64;
        let mut mean = values.clone().sum::<f64>() / divisor;
        if !mean.is_finite() {
            // sum overflowed; scaling first keeps every term within range
            mean = values.map(|value| value / divisor).sum::<f64>();
        }
        let rounded = (mean * 10.0).round() / 10.0;
        Mean::Value(if rounded.is_finite() { rounded } else { mean })
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Mean::NoData => None,
            Mean::Value(value) => Some(*value),
        }
    }
}

impl fmt::Display for Mean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mean::NoData => write!(f, "-"),
            Mean::Value(value) => write!(f, "{:.1}", value),
        }
    }
}

/// Aggregates over the full collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub mean_rating_a: Mean,
    pub mean_rating_b: Mean,
    pub mean_average: Mean,
}

pub fn statistics(movies: &[Movie]) -> Statistics {
    let count = movies.len();
    Statistics {
        count,
        mean_rating_a: Mean::of(movies.iter().map(Movie::rating_a), count),
        mean_rating_b: Mean::of(movies.iter().map(Movie::rating_b), count),
        mean_average: Mean::of(movies.iter().map(Movie::average), count),
    }
}
