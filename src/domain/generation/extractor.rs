//! Syntactic extraction of structured data from provider text.
//!
//! Models are instructed to return bare JSON but routinely wrap it in
//! markdown code fences anyway. Extraction strips that wrapping and parses
//! the remainder; no semantic validation happens here.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during response extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("invalid response format: {0}")]
    InvalidFormat(String),
}

/// Extracts a JSON object from raw provider text.
///
/// # Steps
/// 1. Trim surrounding whitespace
/// 2. Strip a fenced code block (with or without a language tag), keeping
///    inner content verbatim
/// 3. Parse as JSON and require an object at the top level
pub fn extract(raw: &str) -> Result<Value, ExtractionError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ExtractionError::InvalidFormat(e.to_string()))?;

    if !value.is_object() {
        return Err(ExtractionError::InvalidFormat(
            "top-level value is not an object".to_string(),
        ));
    }

    Ok(value)
}

/// Strips an enclosing markdown code fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // The rest of the opening fence line is a language tag; drop it.
    let Some(newline) = after_open.find('\n') else {
        return trimmed;
    };
    let body = &after_open[newline + 1..];

    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}
