//! # mvtgen
//!
//! Turns a natural-language description of a multivariate test (MVT) into a nested JSON
//! configuration by delegating to a hosted model, validates JSON syntax, and explains a
//! configuration back in prose.
//!
//! ## Pipeline
//!
//! [`ConfigurationService`] builds a prompt ([`prompts`]) → [`ModelGateway`] makes one remote
//! call → [`extract_json`] isolates the JSON from the reply → [`validate`] confirms syntax →
//! the caller receives [`CanonicalJson`] or a [`ServiceError`].
//!
//! ## Main modules
//!
//! - [`extract`]: fenced-block extraction from free-form model output.
//! - [`validate`]: syntax validation ([`ValidationResult`]) and canonical re-serialization.
//! - [`llm`]: [`ModelGateway`] trait, [`BedrockGateway`] (AWS Bedrock Runtime via the AWS SDK), [`MockGateway`].
//! - [`prompts`]: system prompt and message templates.
//! - [`service`]: [`ConfigurationService`] with `generate_or_update`, `validate_only`, `explain`.
//! - [`protocol`]: HTTP request/response bodies shared by the server and CLI.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mvtgen::{BedrockConfig, BedrockGateway, ConfigurationService};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = BedrockGateway::new(BedrockConfig::from_env()).await;
//! let service = ConfigurationService::new(Arc::new(gateway));
//! let json = service
//!     .generate_or_update("Create a test with 2 variants, 50/50 split, targeting US users", None)
//!     .await?;
//! println!("{}", json);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod llm;
pub mod prompts;
pub mod protocol;
pub mod service;
pub mod validate;

pub use error::{RequiredField, ServiceError};
pub use extract::extract_json;
pub use llm::{
    BedrockConfig, BedrockGateway, CompletionRequest, GatewayError, MockGateway, ModelGateway,
    DEFAULT_MODEL_ID,
};
pub use protocol::{
    ErrorResponse, ExplainRequest, ExplainResponse, GenerateRequest, GenerateResponse,
    ValidateRequest,
};
pub use service::ConfigurationService;
pub use validate::{parse_canonical, validate, CanonicalJson, ValidationResult};
