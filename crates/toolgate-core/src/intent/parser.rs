//! Intent extraction from model output
//!
//! The model is instructed to answer with a single JSON object, but real
//! responses arrive wrapped in markdown fences and carry escaped
//! punctuation artifacts. The normalization order is load-bearing and must
//! stay exactly: escape-fix, fence-strip, trim, parse.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FacadeError, FacadeResult};
use crate::types::ToolInvocation;

/// First fenced block explicitly tagged as JSON, dot matching newlines
static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\n(.*?)```").expect("fence regex compiles"));

/// Undo known text-generation escape artifacts. Idempotent: the
/// replacements produce characters the patterns cannot match again.
fn normalize_artifacts(text: &str) -> String {
    text.replace("\\_", "_").replace("\\\"", "\"").trim().to_string()
}

/// Extract a `ToolInvocation` from free-form model output.
///
/// Takes the first ```json fenced block when present, otherwise the whole
/// normalized text; strips boundary whitespace and stray fence backticks;
/// then parses. Any parse failure is `MalformedIntent` carrying the
/// original raw text; no further repair is attempted.
pub fn parse_intent(text: &str) -> FacadeResult<ToolInvocation> {
    let cleaned = normalize_artifacts(text);

    let json_part = match JSON_FENCE.captures(&cleaned) {
        Some(captures) => captures.get(1).map(|m| m.as_str()).unwrap_or(&cleaned),
        None => &cleaned,
    };

    let json_part = json_part
        .trim()
        .trim_start_matches('`')
        .trim_end_matches('`');

    serde_json::from_str(json_part).map_err(|_| FacadeError::MalformedIntent {
        raw: text.to_string(),
    })
}
