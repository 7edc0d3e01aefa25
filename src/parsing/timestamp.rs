//! Timestamp normalization for header lines.
//!
//! Exports write dates in whatever convention the exporting device used.
//! The normalizer first canonicalizes the captured text into
//! `<date>, <time>[ AM|PM]` and then tries a fixed, ordered list of chrono
//! format strings, returning the first that parses and validates.
//!
//! Order:
//! 1. day-first before month-first
//! 2. two-digit year before four-digit year (`%Y` would otherwise read `23`
//!    as year 23)
//! 3. 12-hour with seconds, 12-hour, 24-hour with seconds, 24-hour
//!
//! `03/04/2023` therefore reads as 3 April. An export that is month-first is
//! only recognized as such on days past the 12th; nothing here tries to infer
//! the convention from other lines.

use chrono::NaiveDateTime;

use crate::error::ChatlensError;

const DATE_ORDERS: [&str; 2] = ["%d/%m", "%m/%d"];
const YEAR_WIDTHS: [&str; 2] = ["%y", "%Y"];
const TIME_FORMATS: [&str; 4] = ["%I:%M:%S %p", "%I:%M %p", "%H:%M:%S", "%H:%M"];

/// Builds the default ordered format list.
pub fn default_formats() -> Vec<String> {
    let mut formats = Vec::with_capacity(DATE_ORDERS.len() * YEAR_WIDTHS.len() * TIME_FORMATS.len());
    for date in DATE_ORDERS {
        for year in YEAR_WIDTHS {
            for time in TIME_FORMATS {
                formats.push(format!("{date}/{year}, {time}"));
            }
        }
    }
    formats
}

/// Converts raw header timestamps into naive date-times.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::TimestampNormalizer;
/// use chrono::{Datelike, Timelike};
///
/// let normalizer = TimestampNormalizer::new();
/// let ts = normalizer.normalize("12/25/2023, 10:30 AM").unwrap();
///
/// assert_eq!((ts.month(), ts.day()), (12, 25));
/// assert_eq!(ts.hour(), 10);
/// assert!(normalizer.normalize("99/99/9999, 99:99").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
    formats: Vec<String>,
}

impl TimestampNormalizer {
    /// Creates a normalizer with the default format list.
    pub fn new() -> Self {
        Self {
            formats: default_formats(),
        }
    }

    /// Creates a normalizer with a custom ordered format list.
    ///
    /// Formats apply to the canonical form `<date>, <time>[ AM|PM]`.
    pub fn with_formats(formats: Vec<String>) -> Self {
        Self { formats }
    }

    /// The formats in the order they are tried.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Parses `raw`, returning `None` when no format fits.
    pub fn normalize(&self, raw: &str) -> Option<NaiveDateTime> {
        let canonical = canonicalize(raw);
        self.formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&canonical, fmt).ok())
    }

    /// Parses `raw` taken from physical line `line`.
    pub fn normalize_at(&self, raw: &str, line: usize) -> Result<NaiveDateTime, ChatlensError> {
        self.normalize(raw)
            .ok_or_else(|| ChatlensError::timestamp_format(raw, line))
    }
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites a captured timestamp as `<date>, <time>[ AM|PM]`.
///
/// - non-breaking and narrow no-break spaces become plain spaces
/// - the date/time separator becomes `", "`
/// - `.` between hour and minute becomes `:`
/// - `am`, `a.m.`, `AM` all become ` AM`
pub fn canonicalize(raw: &str) -> String {
    let cleaned = raw.replace(['\u{202f}', '\u{00a0}'], " ");
    let cleaned = cleaned.trim();

    let date_end = cleaned
        .find(|c: char| c == ',' || c.is_whitespace())
        .unwrap_or(cleaned.len());
    let (date, rest) = cleaned.split_at(date_end);
    let rest = rest.trim_start_matches([',', ' ', '\t']);

    let mut time: String = rest
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
        .replace("A.M.", "AM")
        .replace("P.M.", "PM")
        .replace("A.M", "AM")
        .replace("P.M", "PM")
        .replace('.', ":");

    let meridiem = if time.ends_with("AM") || time.ends_with("PM") {
        let suffix = time.split_off(time.len() - 2);
        Some(suffix)
    } else {
        None
    };

    match meridiem {
        Some(m) => format!("{date}, {time} {m}"),
        None => format!("{date}, {time}"),
    }
}
