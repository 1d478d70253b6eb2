//! Serde helpers shared by the entity modules.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format of calendar dates.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decode `null` as the type's default instead of failing.
///
/// Asaas sends `null` for unset optional strings (`"email": null`).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode an enum leniently: empty or unknown values become `None`.
pub(crate) fn unknown_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Decode a JSON object, rejecting arrays and scalars.
///
/// Derived struct impls also accept a sequence, so `[]` would otherwise decode
/// into an all-default entity.
pub(crate) fn from_object<T: DeserializeOwned>(raw: &[u8]) -> serde_json::Result<T> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

/// Parse a `YYYY-MM-DD` date, yielding `None` for anything unparseable.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Decode a date string leniently.
///
/// A malformed date is not a decode error: it becomes `None` and the owning
/// entity's `validate()` reports it as missing.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Encode an optional date as `YYYY-MM-DD`.
#[allow(clippy::ref_option)]
pub(crate) fn date_string<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        let date = parse_date("2025-07-24").unwrap();
        assert_eq!(date.format(DATE_FORMAT).to_string(), "2025-07-24");
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Page {
        limit: u32,
    }

    #[test]
    fn from_object_accepts_objects_only() {
        let page: Page = from_object(br#"{"limit":5}"#).unwrap();
        assert_eq!(page.limit, 5);

        assert!(from_object::<Page>(b"[]").is_err());
        assert!(from_object::<Page>(b"[5]").is_err());
        assert!(from_object::<Page>(b"null").is_err());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("invalid-date").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("2025-02-30").is_none());
    }
}
