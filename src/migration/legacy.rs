use crate::core::{Movie, average_of, parse_rating};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A stored record in an older or partial shape.
///
/// Every field is optional. Numbers written as text are read through the
/// rating parser; values of an unexpected type count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMovie {
    #[serde(default, alias = "nome", deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, alias = "notaDel", deserialize_with = "lenient_number")]
    pub rating_a: Option<f64>,
    #[serde(default, alias = "notaEttore", deserialize_with = "lenient_number")]
    pub rating_b: Option<f64>,
    #[serde(default, alias = "media", deserialize_with = "lenient_number")]
    pub average: Option<f64>,
    #[serde(default, alias = "fotos", deserialize_with = "lenient_photos")]
    pub photos: Option<Vec<String>>,
    /// Single-image field of the oldest shape.
    #[serde(default, alias = "foto", deserialize_with = "lenient_text")]
    pub photo: Option<String>,
    #[serde(default, alias = "dataCriacao", deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, alias = "dataModificacao", deserialize_with = "lenient_text")]
    pub modified_at: Option<String>,
}

impl LegacyMovie {
    /// Applies the upgrade rules in order: single photo into a list, empty
    /// list when still absent, today's date when the creation date is missing.
    pub fn upgrade(self, today: &str) -> Movie {
        let photos = match (self.photos, self.photo.filter(|p| !p.is_empty())) {
            (Some(photos), _) => photos,
            (None, Some(single)) => vec![single],
            (None, None) => Vec::new(),
        };

        let created_at = self
            .created_at
            .filter(|date| !date.trim().is_empty())
            .unwrap_or_else(|| today.to_string());

        let name = self.name.unwrap_or_default();
        let rating_a = self.rating_a.unwrap_or_else(|| {
            warn!("stored record '{}' has no first rating, using 0", name);
            0.0
        });
        let rating_b = self.rating_b.unwrap_or_else(|| {
            warn!("stored record '{}' has no second rating, using 0", name);
            0.0
        });
        let average = self
            .average
            .unwrap_or_else(|| average_of(rating_a, rating_b));

        Movie::from_stored(
            name,
            rating_a,
            rating_b,
            average,
            photos,
            created_at,
            self.modified_at,
        )
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => parse_rating(&text),
        _ => None,
    })
}

fn lenient_photos<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(photo) => Some(photo),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
