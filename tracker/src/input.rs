//! Opt-in sanity checks for the two search fields.
//!
//! Only applied when `TrackerConfig::validate_input` is set; otherwise the
//! client forwards whatever was typed.

use std::sync::LazyLock;

use common::SearchQuery;
use regex::Regex;

use crate::error::{Result, SearchError};

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 50;

const PLACEHOLDER_TITLES: &[&str] = &["test", "xyz", "abc", "job", "none", "nil", "na", "n/a"];
const PLACEHOLDER_LOCATIONS: &[&str] = &[
    "test", "xyz", "abc", "location", "none", "nil", "na", "n/a",
];

// Four or more consonants in a row reads as keyboard mashing.
static CONSONANT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[bcdfghjklmnpqrstvwxz]{4,}").expect("consonant pattern is valid")
});

static LOCATION_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z .\-]+$").expect("location pattern is valid"));

pub fn validate(query: &SearchQuery) -> Result<()> {
    validate_title(&query.query)?;
    validate_location(&query.location)
}

pub fn validate_title(raw: &str) -> Result<()> {
    let title = raw.trim().to_lowercase();

    if title.is_empty() {
        return reject("Please enter a job title");
    }
    check_common(
        &title,
        "Job title",
        PLACEHOLDER_TITLES,
        "Please enter a valid job title",
    )?;

    if CONSONANT_RUN.is_match(&title) || !title.chars().any(|c| "aeiou".contains(c)) {
        return reject(format!(
            "'{}' doesn't appear to be a valid job title",
            raw.trim()
        ));
    }
    Ok(())
}

pub fn validate_location(raw: &str) -> Result<()> {
    let location = raw.trim().to_lowercase();

    if location.is_empty() {
        return reject("Please enter a location");
    }
    check_common(
        &location,
        "Location",
        PLACEHOLDER_LOCATIONS,
        "Please enter a valid location",
    )?;

    if !LOCATION_CHARS.is_match(&location) {
        return reject("Location contains invalid characters");
    }
    Ok(())
}

fn check_common(
    value: &str,
    field: &str,
    placeholders: &[&str],
    placeholder_msg: &str,
) -> Result<()> {
    let len = value.chars().count();
    if len < MIN_LEN {
        return reject(format!("{field} must be at least {MIN_LEN} characters long"));
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return reject(format!("{field} cannot be numbers only"));
    }
    if !value.chars().any(char::is_alphabetic) {
        return reject(format!("{field} must contain at least one letter"));
    }
    if placeholders.contains(&value) {
        return reject(placeholder_msg);
    }
    if len > MAX_LEN {
        return reject(format!("{field} is too long. Please be more specific"));
    }
    Ok(())
}

fn reject(message: impl Into<String>) -> Result<()> {
    Err(SearchError::Input(message.into()))
}
