/// Serde adapter for nullable date columns
///
/// Dates are `Option<NaiveDate>` in the models. On the wire an absent date is
/// the empty string, never `null` and never omitted; a present one is
/// `YYYY-MM-DD`. Deserialization accepts `""`, `null`, a missing field (with
/// `#[serde(default)]`) or a date string.
///
/// ```
/// use chrono::NaiveDate;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Row {
///     #[serde(with = "taskboard_shared::serde_date")]
///     completion_date: Option<NaiveDate>,
/// }
///
/// let json = serde_json::to_string(&Row { completion_date: None }).unwrap();
/// assert_eq!(json, r#"{"completion_date":""}"#);
/// ```

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};

/// Wire format of a present date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_str(""),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(de::Error::custom),
    }
}
