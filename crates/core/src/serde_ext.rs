//! Lenient field decoders for API payloads.

use std::fmt::{self, Formatter};

use jiff::{
    Timestamp,
    civil::{Date, DateTime, Time},
    tz::TimeZone,
};
use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};
use thiserror::Error;

/// A date or date-time string could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised date {0:?}")]
pub struct DateParseError(pub String);

/// Parse the date formats the ordering API emits.
///
/// Accepts RFC 3339 timestamps (read as UTC wall-clock time), civil
/// date-times and bare dates (read as midnight).
///
/// # Errors
///
/// Returns a [`DateParseError`] if none of the formats match.
pub fn parse_datetime(raw: &str) -> Result<DateTime, DateParseError> {
    let raw = raw.trim();

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Ok(timestamp.to_zoned(TimeZone::UTC).datetime());
    }

    if let Ok(datetime) = raw.parse::<DateTime>() {
        return Ok(datetime);
    }

    raw.parse::<Date>()
        .map(|date| date.to_datetime(Time::midnight()))
        .map_err(|_err| DateParseError(raw.to_string()))
}

/// Optional date field; `null` and empty strings read as `None`.
pub(crate) fn optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    raw.filter(|value| !value.trim().is_empty())
        .map(|value| parse_datetime(&value).map_err(de::Error::custom))
        .transpose()
}

/// Status flag sent either as a boolean or as `0`/`1`; `null` reads as `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

struct FlagVisitor;

impl Visitor<'_> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or 0/1 flag")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value != 0)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value != 0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(false)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(false)
    }
}
