//! Header normalization: raw column names to the canonical key space.

use srescue_model::{RescueError, Result};

/// Canonicalize one header: trim, lowercase, collapse internal whitespace
/// runs to a single underscore. Pure and total.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Normalize every header in a table. Two raw headers collapsing to the same
/// normalized key is a contract violation for the whole run.
pub fn normalize_headers(raw: &[String]) -> Result<Vec<String>> {
    let normalized: Vec<String> = raw.iter().map(|header| normalize_header(header)).collect();
    for (idx, name) in normalized.iter().enumerate() {
        if normalized[..idx].contains(name) {
            return Err(RescueError::DuplicateHeader { name: name.clone() });
        }
    }
    Ok(normalized)
}
