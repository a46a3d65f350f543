//! HTTP request/response bodies for `/api/generate`, `/api/validate` and `/api/explain`.
//!
//! Request fields are all optional on the wire: a missing or `null` field deserializes to an
//! empty string so the service reports it as [`ServiceError::EmptyInput`](crate::ServiceError).
//! [`ValidationResult`](crate::ValidationResult) is the validate response body as-is.

use serde::{Deserialize, Deserializer, Serialize};

// -----------------------------------------------------------------------------
// Requests
// -----------------------------------------------------------------------------

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Blank means "generate from scratch".
    #[serde(
        rename = "existingJson",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub existing_json: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidateRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub json: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExplainRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub json: String,
}

// -----------------------------------------------------------------------------
// Responses
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub json: String,
}

impl GenerateResponse {
    pub fn new(json: String) -> Self {
        Self {
            success: true,
            json,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: String,
}

impl ExplainResponse {
    pub fn new(explanation: String) -> Self {
        Self {
            success: true,
            explanation,
        }
    }
}

/// Body of every 4xx/5xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
