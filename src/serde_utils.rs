/// Serde helpers for request bodies coming from the admin forms.
use chrono::NaiveDate;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i32),
    Text(String),
}

/// Deserialize an optional foreign key that may arrive as a number or as a
/// numeric string (HTML `<select>` values are strings).
///
/// - Missing field, `null` or `""` → `None`
/// - `3` or `"3"` → `Some(3)`
/// - anything else → error
///
/// Usage:
/// ```ignore
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::optional_id")]
///     list_id: Option<i32>,
/// }
/// ```
pub fn optional_id<'de, D>(de: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(de)? {
        None => Ok(None),
        Some(IdRepr::Number(id)) => Ok(Some(id)),
        Some(IdRepr::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid id: {text:?}")))
        }
    }
}

/// Deserialize an optional `YYYY-MM-DD` date where an empty string means
/// "not set".
pub fn optional_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(de)? {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid date: {text:?}, expected YYYY-MM-DD"))),
    }
}
