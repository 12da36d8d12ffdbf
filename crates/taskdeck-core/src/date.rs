//! Due-date parsing and formatting
//!
//! Stored due dates are loose: date text, spreadsheet day serials, or
//! millisecond timestamps. This module owns the interpretation rules:
//! - Day serials count from 1899-12-30, the spreadsheet epoch
//! - Numeric values of 100 000 or more are millisecond timestamps
//! - A zero serial means "no date", matching how empty cells import
//!
//! Formatting helpers render one stored value three ways: wire form
//! (`YYYY-MM-DD`), display form (`Jan 15, 2024`), and the empty-capable
//! form used by date inputs.

use chrono::{DateTime, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::DueDateValue;

/// Day zero of the spreadsheet serial scale
pub static SERIAL_EPOCH: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch date"));

static ISO_DAY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid literal regex"));

/// Numeric values at or above this are millisecond timestamps, not serials
pub const TIMESTAMP_CUTOFF: f64 = 100_000.0;

/// Convert a spreadsheet day serial to a calendar date
///
/// Fractional serials floor to whole days. Zero and NaN yield `None`,
/// as do serials that land outside the representable date range.
#[must_use]
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial.is_nan() || serial == 0.0 {
        return None;
    }
    let days = Duration::try_days(serial.floor() as i64)?;
    SERIAL_EPOCH.checked_add_signed(days)
}

/// Convert a millisecond Unix timestamp to a calendar date (UTC)
#[must_use]
pub fn timestamp_millis_to_date(millis: f64) -> Option<NaiveDate> {
    if millis.is_nan() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
}

/// First ten characters of `text` when they look like `YYYY-MM-DD`
///
/// Matches shape only; `2024-99-99` still matches. Callers that need a
/// real date parse the returned slice.
#[must_use]
pub fn iso_day_prefix(text: &str) -> Option<&str> {
    ISO_DAY_PREFIX.is_match(text).then(|| &text[..10])
}

/// Interpret a stored due-date value as a calendar date
#[must_use]
pub fn parse_due_date(value: &DueDateValue) -> Option<NaiveDate> {
    match value {
        DueDateValue::Number(n) => {
            if *n >= TIMESTAMP_CUTOFF {
                timestamp_millis_to_date(*n)
            } else {
                serial_to_date(*n)
            }
        }
        DueDateValue::Text(s) => {
            let prefix = iso_day_prefix(s)?;
            NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
        }
    }
}

/// Wire form of a due date, `YYYY-MM-DD`; `None` when absent or unreadable
#[must_use]
pub fn format_for_backend(value: Option<&DueDateValue>) -> Option<String> {
    let date = parse_due_date(value?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Human-readable due date, falling back to `Not set`
#[must_use]
pub fn format_for_display(value: Option<&DueDateValue>) -> String {
    value
        .and_then(parse_due_date)
        .map_or_else(|| "Not set".to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// Due date for a date input, empty string when absent or unreadable
#[must_use]
pub fn format_for_input(value: Option<&DueDateValue>) -> String {
    value
        .and_then(parse_due_date)
        .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string())
}
