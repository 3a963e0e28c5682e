//! Repair for the backend's stray-prefix envelope defect.
//!
//! The backend occasionally prepends a literal `c` to an otherwise valid JSON
//! body (`c{"user":...}`, `c[...]`). Such bodies fail ordinary JSON decoding
//! and arrive as strings. Repair strips the `c` and parses the remainder; if
//! that still fails the original string is kept.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use super::http::Body;

const PREFIXES: [&str; 2] = ["c{", "c["];

/// Outcome of a single repair attempt.
#[derive(Debug, PartialEq)]
pub enum Repair {
    /// Body is not a prefixed string; nothing to do.
    Untouched,
    /// Prefix stripped and remainder parsed.
    Repaired(serde_json::Value),
    /// Prefix present but remainder is not valid JSON.
    Failed(String),
}

/// Attempt repair on a raw string.
#[must_use]
pub fn repair_text(raw: &str) -> Repair {
    let trimmed = raw.trim();
    if !PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        return Repair::Untouched;
    }
    match serde_json::from_str(&trimmed[1..]) {
        Ok(value) => Repair::Repaired(value),
        Err(e) => Repair::Failed(e.to_string()),
    }
}

/// Repair `body` in place of the caller. Non-string bodies and bodies that
/// fail repair come back unchanged.
#[must_use]
pub fn repair_body(body: Body) -> Body {
    let Some(text) = body.as_str() else {
        return body;
    };
    match repair_text(text) {
        Repair::Repaired(value) => Body::Json(value),
        Repair::Untouched => body,
        Repair::Failed(reason) => {
            leptos::logging::warn!("envelope repair failed, keeping raw body: {reason}");
            body
        }
    }
}
