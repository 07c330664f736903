//! Client-side result filtering
//!
//! Pure predicate narrowing applied after pagination completes. Used where
//! the server-side `filter[...]` parameter is unavailable, and as
//! supplementary narrowing on top of it. No I/O, idempotent.

use regex::RegexBuilder;

use crate::client::models::Resource;
use crate::error::{Error, Result};

/// Keep records whose name contains `needle`, case-insensitively.
pub fn by_name_contains(records: Vec<Resource>, needle: &str) -> Vec<Resource> {
    let needle = needle.to_lowercase();
    records
        .into_iter()
        .filter(|r| {
            r.name()
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}

/// Keep records whose name matches `pattern` (case-insensitive regex).
pub fn by_name_regex(records: Vec<Resource>, pattern: &str) -> Result<Vec<Resource>> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::Other(format!("invalid name pattern '{pattern}': {e}")))?;

    Ok(records
        .into_iter()
        .filter(|r| r.name().map(|n| re.is_match(n)).unwrap_or(false))
        .collect())
}

/// Keep records whose hostname contains `needle`, case-insensitively.
pub fn by_hostname_contains(records: Vec<Resource>, needle: &str) -> Vec<Resource> {
    let needle = needle.to_lowercase();
    records
        .into_iter()
        .filter(|r| {
            r.hostname()
                .map(|h| h.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}
