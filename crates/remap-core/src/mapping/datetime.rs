//! Date-time reformatting between declared strftime patterns
//!
//! A value is parsed with the read-side pattern and rendered with the
//! write-side pattern, preserving the original UTC offset rather than
//! normalizing to local or UTC time. Absent patterns mean RFC 3339 on
//! either side. Patterns carrying no zone information fall back to naive
//! parses with an assumed `+00:00` offset.
//!
//! Copyright (c) 2025 Remap Team
//! Licensed under the MIT OR Apache-2.0 license

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while reformatting a date-time value
#[derive(Error, Debug)]
pub enum DateTimeError {
    #[error("date-time value is not a string")]
    NotAString,

    #[error("could not parse '{value}' as a date-time")]
    Parse { value: String },

    #[error("invalid date-time pattern '{pattern}'")]
    Pattern { pattern: String },
}

/// Reformat a date-time string from `parse_pattern` into `output_pattern`
///
/// Failures are recoverable at the engine level: the caller records a
/// diagnostic and keeps the value as it was after coercion.
pub fn reformat(
    value: &Value,
    parse_pattern: Option<&str>,
    output_pattern: Option<&str>,
) -> Result<Value, DateTimeError> {
    let text = value.as_str().ok_or(DateTimeError::NotAString)?;
    let parsed = parse_preserving_offset(text, parse_pattern)?;

    let rendered = match output_pattern {
        Some(pattern) => {
            let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
            // reject bad patterns up front; formatting them would error mid-write
            if items.iter().any(|item| matches!(item, Item::Error)) {
                return Err(DateTimeError::Pattern {
                    pattern: pattern.to_string(),
                });
            }
            parsed.format_with_items(items.into_iter()).to_string()
        }
        None => parsed.to_rfc3339(),
    };

    Ok(Value::String(rendered))
}

fn parse_preserving_offset(
    text: &str,
    pattern: Option<&str>,
) -> Result<DateTime<FixedOffset>, DateTimeError> {
    let Some(pattern) = pattern else {
        return DateTime::parse_from_rfc3339(text).map_err(|_| DateTimeError::Parse {
            value: text.to_string(),
        });
    };

    if let Ok(parsed) = DateTime::parse_from_str(text, pattern) {
        return Ok(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(DateTimeError::Parse {
        value: text.to_string(),
    })
}
