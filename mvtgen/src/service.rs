//! Configuration service: the three user-facing operations.
//!
//! Each operation is a thin composition of [`prompts`](crate::prompts),
//! [`ModelGateway`], [`extract_json`] and [`validate`](crate::validate()). At most one remote
//! call per operation; `validate_only` is local.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{RequiredField, ServiceError};
use crate::extract::extract_json;
use crate::llm::ModelGateway;
use crate::prompts;
use crate::validate::{self, CanonicalJson, ValidationResult};

/// Generates, validates and explains MVT configurations.
///
/// Cheap to clone; the gateway is shared and holds only immutable configuration, so one
/// service can serve concurrent requests.
#[derive(Clone)]
pub struct ConfigurationService {
    gateway: Arc<dyn ModelGateway>,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl ConfigurationService {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Generates a new configuration from `description`, or updates `existing_json` when it
    /// is present and non-blank.
    ///
    /// Returns [`ServiceError::EmptyInput`] for a blank description (whatever
    /// `existing_json` holds), [`ServiceError::Gateway`] when the model call fails and
    /// [`ServiceError::MalformedOutput`] when the reply holds no valid JSON.
    pub async fn generate_or_update(
        &self,
        description: &str,
        existing_json: Option<&str>,
    ) -> Result<CanonicalJson, ServiceError> {
        if is_blank(description) {
            return Err(ServiceError::EmptyInput(RequiredField::Description));
        }
        let existing_json = existing_json.filter(|s| !is_blank(s));
        let mode = if existing_json.is_some() { "update" } else { "generate" };
        info!(mode, description_len = description.len(), "generating configuration");

        let request = prompts::generation_request(description, existing_json);
        let reply = self.gateway.complete(&request).await.map_err(|e| {
            warn!(mode, error = %e, "model call failed");
            ServiceError::from(e)
        })?;

        let candidate = extract_json(&reply);
        let canonical = validate::parse_canonical(candidate).map_err(|detail| {
            warn!(mode, reply_len = reply.len(), error = %detail, "model returned malformed JSON");
            ServiceError::MalformedOutput(detail)
        })?;
        info!(mode, json_len = canonical.len(), "configuration ready");
        Ok(canonical)
    }

    /// Syntax check only; no model call.
    pub fn validate_only(&self, json_text: &str) -> ValidationResult {
        validate::validate(json_text)
    }

    /// Asks the model for a plain-language summary of `json_text`. The reply is returned
    /// unmodified: it is prose, so no extraction or validation is applied.
    pub async fn explain(&self, json_text: &str) -> Result<String, ServiceError> {
        if is_blank(json_text) {
            return Err(ServiceError::EmptyInput(RequiredField::Json));
        }
        info!(json_len = json_text.len(), "explaining configuration");
        let request = prompts::explanation_request(json_text);
        self.gateway.complete(&request).await.map_err(|e| {
            warn!(error = %e, "model call failed");
            ServiceError::from(e)
        })
    }
}
