//! Timestamp parsing and feed date formatting.
//!
//! Pages store their timestamps as text. Both feed schemas format from the
//! single instant produced by [`Timestamp::parse`]:
//!
//! | Schema     | Format                            | Example                           |
//! |------------|-----------------------------------|-----------------------------------|
//! | JSON Feed  | `YYYY-MM-DDTHH:MM:SS±HH:MM`       | `2023-01-05T10:00:00+00:00`       |
//! | RSS 2.0    | `Www, DD Mon YYYY HH:MM:SS ±HHMM` | `Thu, 05 Jan 2023 10:00:00 +0000` |

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt;
use thiserror::Error;

/// `strftime` pattern for the structured (JSON Feed) schema.
const RFC3339_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// `strftime` pattern for the XML (RSS) schema.
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Naive layouts tried after RFC 3339 / RFC 2822, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored timestamp text that matched no known layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized timestamp `{0}`")]
pub struct DateError(pub String);

/// A timezone-aware instant parsed from page metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parse a stored timestamp.
    ///
    /// Tried in order: RFC 3339, RFC 2822, the site's `custom` format (if any),
    /// then `YYYY-MM-DD[ HH:MM[:SS]]` as UTC.
    pub fn parse(s: &str, custom: Option<&str>) -> Result<Self, DateError> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Ok(Self(dt));
        }
        if let Some(ts) = custom.and_then(|format| parse_with(s, format)) {
            return Ok(ts);
        }

        NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|format| parse_with(s, format))
            .or_else(|| {
                NaiveDate::parse_from_str(s, NAIVE_DATE_FORMAT)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| Self(naive.and_utc().fixed_offset()))
            })
            .ok_or_else(|| DateError(s.to_owned()))
    }

    /// `2023-01-05T10:00:00+00:00`
    pub fn to_rfc3339(self) -> String {
        self.0.format(RFC3339_FORMAT).to_string()
    }

    /// `Thu, 05 Jan 2023 10:00:00 +0000`
    pub fn to_rfc822(self) -> String {
        self.0.format(RFC822_FORMAT).to_string()
    }

    pub const fn inner(self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Try one layout: with an explicit offset, as a naive UTC datetime, then as a
/// date at midnight UTC.
fn parse_with(s: &str, format: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_str(s, format) {
        return Some(Timestamp(dt));
    }
    NaiveDateTime::parse_from_str(s, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Timestamp(naive.and_utc().fixed_offset()))
}
