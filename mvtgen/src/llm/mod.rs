//! Model gateway abstraction.
//!
//! [`ConfigurationService`](crate::ConfigurationService) depends on a callable that takes an
//! optional system prompt plus one user message and returns the model's raw text. This module
//! defines that trait, the AWS Bedrock implementation and a mock for tests.
//!
//! One call to [`ModelGateway::complete`] is one outbound request: no retries, no caching.

mod bedrock;
mod mock;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use aws_credential_types::Credentials;
pub use bedrock::{BedrockConfig, BedrockGateway, DEFAULT_MODEL_ID};
pub use mock::MockGateway;

/// Single-turn completion input.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    /// System instructions; `None` sends no system prompt at all.
    pub system: Option<String>,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Failure of a remote model call. Remote messages are carried verbatim.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no AWS credentials found (env, shared profile, SSO or instance role)")]
    MissingCredentials,
    #[error("{0}")]
    Transport(String),
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    /// Non-success status from the endpoint: auth, throttling, validation, model errors.
    #[error("HTTP {status}: {message}")]
    Remote { status: u16, message: String },
    /// Success status but the body was not the expected messages response.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}

/// Remote text-completion capability.
///
/// Implementations: [`BedrockGateway`] (AWS Bedrock Runtime), [`MockGateway`] (fixed reply).
/// Must be stateless apart from immutable configuration so one instance can serve
/// concurrent requests.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
