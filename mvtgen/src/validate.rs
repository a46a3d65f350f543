//! JSON syntax validation and canonical re-serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used for empty or whitespace-only input; checked before the parser runs.
pub const NO_JSON_PROVIDED: &str = "No JSON provided";

/// Pretty-printed (2-space indent) JSON text, keys in the order they were received.
pub type CanonicalJson = String;

/// Outcome of [`validate`]. `error` is present iff `valid` is false.
///
/// Serializes as `{"valid":true}` or `{"valid":false,"error":"..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

fn parse(text: &str) -> Result<Value, String> {
    if text.trim().is_empty() {
        return Err(NO_JSON_PROVIDED.to_string());
    }
    serde_json::from_str(text).map_err(|e| e.to_string())
}

/// Parses `text` and reports syntactic validity. The error message is the parser's own
/// diagnostic (e.g. `trailing comma at line 1 column 8`).
pub fn validate(text: &str) -> ValidationResult {
    match parse(text) {
        Ok(_) => ValidationResult::ok(),
        Err(e) => ValidationResult::invalid(e),
    }
}

/// Parses `text` and re-serializes it as [`CanonicalJson`]. On failure returns the same
/// diagnostic [`validate`] would report.
pub fn parse_canonical(text: &str) -> Result<CanonicalJson, String> {
    let value = parse(text)?;
    serde_json::to_string_pretty(&value).map_err(|e| e.to_string())
}
