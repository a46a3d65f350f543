//! AWS Bedrock Runtime gateway (`InvokeModel`, Anthropic messages body).
//!
//! Credentials come from the SDK's default provider chain (env, shared profile, SSO,
//! container and instance roles) unless [`BedrockConfig::with_credentials`] pins static
//! ones. Retries are disabled: one call is one request, bounded by the operation timeout.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_sdk_bedrockruntime::config::http::HttpResponse;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CompletionRequest, GatewayError, ModelGateway};

/// Model used when `BEDROCK_MODEL_ID` is not set.
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-5-sonnet-20241022-v2:0";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const JSON: &str = "application/json";

/// Region, model and endpoint for [`BedrockGateway`].
#[derive(Clone, Debug)]
pub struct BedrockConfig {
    pub region: String,
    /// Static credentials; `None` resolves them through the default provider chain.
    pub credentials: Option<Credentials>,
    pub model_id: String,
    /// Endpoint URL override (VPC endpoint, proxy, test server).
    pub endpoint: Option<String>,
    /// Upper bound for one whole call, connect included.
    pub timeout: Duration,
}

impl BedrockConfig {
    pub fn new(region: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            credentials: None,
            model_id: model_id.into(),
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builds config from environment variables; unset or invalid values use defaults.
    ///
    /// - `AWS_REGION` (default `us-east-1`)
    /// - `BEDROCK_MODEL_ID` (default [`DEFAULT_MODEL_ID`])
    /// - `BEDROCK_ENDPOINT` (optional endpoint URL)
    /// - `BEDROCK_TIMEOUT_SECS` (default 60)
    ///
    /// Credentials are left to the provider chain (`AWS_ACCESS_KEY_ID`,
    /// `AWS_PROFILE`, ...).
    pub fn from_env() -> Self {
        let timeout_secs = env_config::env_or("BEDROCK_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs());
        Self {
            region: env_config::env_opt("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            credentials: None,
            model_id: env_config::env_opt("BEDROCK_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            endpoint: env_config::env_opt("BEDROCK_ENDPOINT"),
            timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct InvokeBody<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [UserTurn<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct UserTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

/// [`ModelGateway`] backed by AWS Bedrock Runtime.
pub struct BedrockGateway {
    client: Client,
    credentials: Option<SharedCredentialsProvider>,
    config: BedrockConfig,
}

impl BedrockGateway {
    /// Loads the shared AWS config for `config.region` and builds the runtime client.
    pub async fn new(config: BedrockConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .build();
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeouts);
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        if let Some(credentials) = &config.credentials {
            loader = loader.credentials_provider(credentials.clone());
        }
        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            credentials: sdk_config.credentials_provider(),
            config,
        }
    }

    pub fn config(&self) -> &BedrockConfig {
        &self.config
    }

    /// Whether the provider chain can produce credentials right now.
    pub async fn has_credentials(&self) -> bool {
        match &self.credentials {
            Some(provider) => provider.provide_credentials().await.is_ok(),
            None => false,
        }
    }

    fn map_sdk_error(&self, err: SdkError<InvokeModelError, HttpResponse>) -> GatewayError {
        if is_missing_credentials(&err) {
            return GatewayError::MissingCredentials;
        }
        match err {
            SdkError::TimeoutError(_) => GatewayError::Timeout(self.config.timeout),
            SdkError::DispatchFailure(ref failure) if failure.is_timeout() => {
                GatewayError::Timeout(self.config.timeout)
            }
            SdkError::ServiceError(ctx) => {
                let status = ctx.raw().status().as_u16();
                let message = match ctx.err().message() {
                    Some(m) => m.to_string(),
                    None => ctx
                        .raw()
                        .body()
                        .bytes()
                        .map(|b| String::from_utf8_lossy(b).trim().to_string())
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| ctx.err().to_string()),
                };
                GatewayError::Remote { status, message }
            }
            other => GatewayError::Transport(DisplayErrorContext(&other).to_string()),
        }
    }
}

/// True when the failure comes from the provider chain finding no credentials.
fn is_missing_credentials(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(e) = source {
        if let Some(c) = e.downcast_ref::<CredentialsError>() {
            return matches!(c, CredentialsError::CredentialsNotLoaded(_));
        }
        source = e.source();
    }
    false
}

#[async_trait]
impl ModelGateway for BedrockGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = InvokeBody {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages: [UserTurn {
                role: "user",
                content: &request.user_message,
            }],
            temperature: request.temperature,
        };
        let payload =
            serde_json::to_vec(&body).map_err(|e| GatewayError::Transport(e.to_string()))?;

        debug!(
            model = %self.config.model_id,
            max_tokens = request.max_tokens,
            has_system = request.system.is_some(),
            "bedrock invoke"
        );
        let started = Instant::now();

        let output = self
            .client
            .invoke_model()
            .model_id(&self.config.model_id)
            .content_type(JSON)
            .accept(JSON)
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e))?;

        let parsed: InvokeResponse = serde_json::from_slice(output.body().as_ref())
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        if let Some(usage) = &parsed.usage {
            info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "bedrock invoke done"
            );
        }
        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| GatewayError::MalformedResponse("no text in content[0]".to_string()))
    }
}
