use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;

use crate::{extract::extract_transformed_text, GatewayConfig, TextTransformer, TransformerFailure};

const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Serialize)]
struct TransformRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

pub struct GatewayClient {
    client: Client,
    config: GatewayConfig,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send(&self, text: &str) -> Result<String, TransformerFailure> {
        let request = TransformRequest {
            text,
            model: self.config.model.as_deref(),
        };

        let mut builder = self.client.post(self.config.endpoint.clone()).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| TransformerFailure::Request {
                endpoint: self.config.endpoint.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let mut body = response.text().await.unwrap_or_default();
            truncate_on_char_boundary(&mut body, ERROR_BODY_LIMIT);
            return Err(TransformerFailure::Status { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransformerFailure::Request {
                endpoint: self.config.endpoint.to_string(),
                source,
            })?;

        let result: Value = serde_json::from_slice(&bytes)
            .map_err(|e| TransformerFailure::MalformedResponse(e.to_string()))?;

        extract_transformed_text(&result).ok_or(TransformerFailure::MissingField)
    }
}

#[async_trait]
impl TextTransformer for GatewayClient {
    async fn try_transform(&self, text: &str) -> Result<String, TransformerFailure> {
        match timeout(self.config.timeout, self.send(text)).await {
            Ok(result) => result,
            Err(_) => Err(TransformerFailure::Timeout(self.config.timeout)),
        }
    }
}

fn truncate_on_char_boundary(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
