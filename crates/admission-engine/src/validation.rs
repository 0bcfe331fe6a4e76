//! Format checks for traveller fields.

use crate::error::{AdmissionError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Format of every date in the datasets.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn passport_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^-]{5}(-[^-]{5}){4}$").expect("passport pattern is valid")
    })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"))
}

/// Checks that a passport number is five groups of five characters separated
/// by hyphens. Any character other than a hyphen counts, so case never matters.
pub fn is_valid_passport(passport: &str) -> bool {
    passport_pattern().is_match(passport.trim())
}

/// Checks that a date is `YYYY-MM-DD` and names a real calendar day.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_ok()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if !date_pattern().is_match(value) {
        return Err(AdmissionError::invalid_field(
            "date",
            format!("'{}' is not in YYYY-MM-DD format", value),
        ));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        AdmissionError::invalid_field("date", format!("'{}' is not a calendar date: {}", value, e))
    })
}

/// Returns the non-blank value of a required field.
pub fn require_field<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AdmissionError::MissingField(field_name.to_string()))
}

/// Validates a required date field.
pub fn require_date(field_name: &str, value: &Option<String>) -> Result<NaiveDate> {
    let raw = require_field(field_name, value)?;
    parse_date(raw).map_err(|e| match e {
        AdmissionError::InvalidFieldValue { message, .. } => {
            AdmissionError::invalid_field(field_name, message)
        }
        other => other,
    })
}

/// Validates a required passport field.
pub fn require_passport(field_name: &str, value: &Option<String>) -> Result<()> {
    let raw = require_field(field_name, value)?;
    if is_valid_passport(raw) {
        Ok(())
    } else {
        Err(AdmissionError::invalid_field(
            field_name,
            format!("'{}' is not five hyphen-separated groups of five characters", raw),
        ))
    }
}
