use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod endpoint;
pub mod extract;
pub mod gateway;

pub use endpoint::{normalize_endpoint, EndpointError};
pub use gateway::GatewayClient;
pub use url::Url;

#[derive(Error, Debug)]
pub enum TransformerFailure {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("gateway returned error status: {status}, body: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("gateway response did not contain transformed text")]
    MissingField,

    #[error("gateway call timed out after {0:?}")]
    Timeout(Duration),
}

/// Result of a single transformation attempt.
///
/// A failed attempt still carries the text that should be stored, so callers
/// can keep going while the failure stays visible.
#[derive(Debug)]
pub enum TransformOutcome {
    Transformed(String),
    Fallback {
        original: String,
        failure: TransformerFailure,
    },
}

impl TransformOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, TransformOutcome::Fallback { .. })
    }

    pub fn into_text(self) -> String {
        match self {
            TransformOutcome::Transformed(text) => text,
            TransformOutcome::Fallback { original, .. } => original,
        }
    }
}

#[async_trait]
pub trait TextTransformer: Send + Sync {
    /// One remote attempt, no retry.
    async fn try_transform(&self, text: &str) -> Result<String, TransformerFailure>;

    async fn transform(&self, text: &str) -> TransformOutcome {
        match self.try_transform(text).await {
            Ok(transformed) => TransformOutcome::Transformed(transformed),
            Err(failure) => {
                tracing::error!(text = %text, error = %failure, "LLM gateway call failed");
                TransformOutcome::Fallback {
                    original: text.to_string(),
                    failure,
                }
            }
        }
    }
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct GatewayConfig {
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            api_key: None,
            model: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
