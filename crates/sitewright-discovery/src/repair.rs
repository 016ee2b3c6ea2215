//! Heuristic normalization of agent output into parseable JSON text.
//!
//! Pure string surgery, kept behind one function so it can be unit-tested
//! against a table of malformed inputs without a live agent.

use thiserror::Error;

/// How much of an unparseable response to carry in the error for diagnosis.
const EXCERPT_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepairError {
    #[error("no JSON object found in agent response (starts with: {excerpt:?})")]
    NoJsonObject { excerpt: String },
}

/// Normalize a raw agent reply to the JSON object text it should contain.
///
/// Tolerates surrounding whitespace, a Markdown code fence (with or without a
/// `json` tag), and leading/trailing prose around the object. Returns an
/// error carrying a prefix of the input when no `{...}` span exists at all.
pub fn repair_to_json_text(raw: &str) -> Result<&str, RepairError> {
    let trimmed = raw.trim();
    let text = strip_code_fence(trimmed);

    if text.starts_with('{') && text.ends_with('}') {
        return Ok(text);
    }

    // Greedy span from the first '{' to the last '}' strips prose like
    // "Here is the result: {...}. Let me know if..."
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(RepairError::NoJsonObject {
            excerpt: excerpt(trimmed),
        }),
    }
}

/// Strip one leading/trailing Markdown fence pair, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let rest = rest.trim_start();
    match rest.strip_suffix("```") {
        Some(body) => body.trim_end(),
        None => rest,
    }
}

/// First `EXCERPT_LEN` characters, for error messages.
pub(crate) fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}

#[cfg(test)]
#[path = "repair_tests.rs"]
mod tests;
