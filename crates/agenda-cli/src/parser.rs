use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};

/// Parses user-entered instants: ISO-ish dates ("2024-03-15 10:00") as well
/// as relative phrases ("tomorrow 9am"), anchored at the current time.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    parse_date_string(input, Utc::now(), Dialect::Us)
        .map_err(|e| anyhow::anyhow!("Failed to parse time '{}': {}", input, e))
}

/// Like [`parse_instant`], but `None` means "now".
pub fn parse_instant_or_now(input: Option<&str>) -> Result<DateTime<Utc>> {
    match input {
        Some(raw) => parse_instant(raw),
        None => Ok(Utc::now()),
    }
}
