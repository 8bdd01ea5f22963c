//! Tolerant extraction of structured payloads from raw provider text
//!
//! Providers wrap their JSON in markdown fences, lead-in prose, or leave
//! trailing separators behind. Extraction is a two-stage parse: strip the
//! known wrappers, then bounded-scan for the outermost brace pair, with
//! an explicit fail path instead of string-replace chains.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::{AnalyzerError, AnalyzerResult};

/// The structured shape every domain provider is asked to produce.
///
/// Extra envelope fields are ignored; missing findings default to empty
/// so a score-only reply still normalizes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DomainPayload {
    pub score: f64,
    #[serde(default)]
    pub findings: Vec<String>,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```[a-zA-Z]*").expect("fence pattern is valid"))
}

fn trailing_comma_regex() -> &'static Regex {
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    TRAILING.get_or_init(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid"))
}

/// Parse a domain payload out of arbitrary provider text.
///
/// Fails with `UnparseableResponse` when no valid object can be
/// recovered; never panics, including on empty input.
pub fn extract_payload(text: &str) -> AnalyzerResult<DomainPayload> {
    let stripped = fence_regex().replace_all(text, "");
    let trimmed = stripped.trim();

    if trimmed.is_empty() {
        return Err(AnalyzerError::unparseable("empty response"));
    }

    if let Ok(payload) = serde_json::from_str::<DomainPayload>(trimmed) {
        return Ok(payload);
    }

    // Re-attempt on the outermost brace span
    let span = brace_span(trimmed)
        .ok_or_else(|| AnalyzerError::unparseable("no JSON object found in response"))?;

    if let Ok(payload) = serde_json::from_str::<DomainPayload>(span) {
        return Ok(payload);
    }

    // Last resort: drop trailing commas before closing braces/brackets
    let cleaned = trailing_comma_regex().replace_all(span, "$1");
    serde_json::from_str::<DomainPayload>(&cleaned)
        .map_err(|e| AnalyzerError::unparseable(format!("invalid JSON object: {e}")))
}

/// Outermost `{` .. `}` span, if any
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
