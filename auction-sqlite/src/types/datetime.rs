//! UTC timestamps as stored by the auction backend.

use std::{borrow::Borrow, fmt::Display, ops::Add, time::Duration};
use time::format_description::well_known::Rfc3339;

/// A UTC datetime with subsecond precision.
///
/// Serializes as RFC3339. In SQLite it is stored as text whose lexicographic
/// order matches chronological order, so range filters can run in SQL.
///
/// ```
/// # use auction_sqlite::types::DateTime;
/// # use std::time::Duration;
/// let start = DateTime::from(time::OffsetDateTime::UNIX_EPOCH);
/// assert_eq!((start + Duration::from_secs(90)).to_string(), "1970-01-01T00:01:30Z");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "DateTimeDto", into = "DateTimeDto")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: time::OffsetDateTime = (*self).into();
        let formatted = value.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl<T: Borrow<time::OffsetDateTime>> From<T> for DateTime {
    fn from(value: T) -> Self {
        let utc = value.borrow().to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

impl Add<Duration> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs)
    }
}

// (De)serialization always goes through RFC3339.

#[derive(serde::Serialize, serde::Deserialize)]
struct DateTimeDto(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<DateTimeDto> for DateTime {
    fn from(value: DateTimeDto) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for DateTimeDto {
    fn from(value: DateTime) -> Self {
        DateTimeDto(value.into())
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DateTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DateTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_normalized_to_utc() {
        let local: time::OffsetDateTime =
            time::OffsetDateTime::parse("2024-05-01T12:00:00+02:00", &Rfc3339).unwrap();
        let stored = DateTime::from(local);
        assert_eq!(stored.to_string(), "2024-05-01T10:00:00Z");
    }

    #[test]
    fn serde_round_trips_rfc3339() {
        let value: DateTime = serde_json::from_str(r#""2024-05-01T10:00:00.25Z""#).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#""2024-05-01T10:00:00.25Z""#);
    }
}
