use serde::{Deserialize, Serialize};

/// One rated title: two sub-ratings, the derived average, photos and dates.
///
/// The average is derived from the two ratings and is only ever written
/// through [`Movie::new`] and [`Movie::rerate`]. `created_at` is fixed when the
/// entry is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(alias = "nome")]
    name: String,
    #[serde(alias = "notaDel")]
    rating_a: f64,
    #[serde(alias = "notaEttore")]
    rating_b: f64,
    #[serde(alias = "media")]
    average: f64,
    #[serde(alias = "fotos")]
    photos: Vec<String>,
    #[serde(alias = "dataCriacao")]
    created_at: String,
    #[serde(
        default,
        alias = "dataModificacao",
        skip_serializing_if = "Option::is_none"
    )]
    modified_at: Option<String>,
}

impl Movie {
    /// Creates a fresh entry with no photos and no modification date.
    pub fn new(name: impl Into<String>, rating_a: f64, rating_b: f64, created_at: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating_a,
            rating_b,
            average: average_of(rating_a, rating_b),
            photos: Vec::new(),
            created_at: created_at.into(),
            modified_at: None,
        }
    }

    /// Rebuilds an entry from stored parts, keeping the stored average as-is.
    pub(crate) fn from_stored(
        name: String,
        rating_a: f64,
        rating_b: f64,
        average: f64,
        photos: Vec<String>,
        created_at: String,
        modified_at: Option<String>,
    ) -> Self {
        Self {
            name,
            rating_a,
            rating_b,
            average,
            photos,
            created_at,
            modified_at,
        }
    }

    pub(crate) fn backfill_created_at(&mut self, today: &str) {
        self.created_at = today.to_string();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating_a(&self) -> f64 {
        self.rating_a
    }

    pub fn rating_b(&self) -> f64 {
        self.rating_b
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn modified_at(&self) -> Option<&str> {
        self.modified_at.as_deref()
    }

    /// Overwrites name and ratings, recomputes the average and stamps the
    /// modification date. Photos and creation date are untouched.
    pub fn rerate(&mut self, name: impl Into<String>, rating_a: f64, rating_b: f64, modified_at: impl Into<String>) {
        self.name = name.into();
        self.rating_a = rating_a;
        self.rating_b = rating_b;
        self.average = average_of(rating_a, rating_b);
        self.modified_at = Some(modified_at.into());
    }

    /// Appends photos in the given order.
    pub fn push_photos<I>(&mut self, photos: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.photos.extend(photos);
    }

    /// Removes the photo at `index`, if there is one.
    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        if index < self.photos.len() {
            Some(self.photos.remove(index))
        } else {
            None
        }
    }
}

pub fn average_of(rating_a: f64, rating_b: f64) -> f64 {
    (rating_a + rating_b) / 2.0
}

/// Parses a user-entered rating.
///
/// Surrounding whitespace is ignored and a comma is accepted as the decimal
/// separator. The longest leading decimal literal is taken (`"8/10"` reads as
/// 8). Empty, non-numeric and non-finite input yields `None`.
pub fn parse_rating(text: &str) -> Option<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    let literal = leading_decimal(&normalized)?;
    let value = literal.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Renders a rating for the input form, with a comma decimal separator.
pub fn format_rating(value: f64) -> String {
    value.to_string().replace('.', ",")
}

fn leading_decimal(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let digits_from = |mut at: usize| {
        while at < len && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_start = end + 1;
        if exp_start < len && matches!(bytes[exp_start], b'+' | b'-') {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    Some(&text[..end])
}
