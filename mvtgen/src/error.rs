//! Error taxonomy of the configuration service.

use std::fmt;

use thiserror::Error;

use crate::llm::GatewayError;

/// Request field that must be present and non-blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredField {
    Description,
    Json,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Description => "Description",
            Self::Json => "JSON",
        })
    }
}

/// Failure of a [`ConfigurationService`](crate::ConfigurationService) operation.
///
/// Each operation either succeeds or returns exactly one of these.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required text field was missing or blank (HTTP 400).
    #[error("{0} is required")]
    EmptyInput(RequiredField),
    /// The model reply did not contain syntactically valid JSON (HTTP 500).
    #[error("Invalid JSON generated: {0}")]
    MalformedOutput(String),
    /// The remote model call failed (HTTP 500). Message passed through unsanitized.
    #[error("Error calling Bedrock: {0}")]
    Gateway(#[from] GatewayError),
}

impl ServiceError {
    /// True when the caller supplied bad input rather than the backend failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyInput(_))
    }
}
