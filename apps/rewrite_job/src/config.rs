use std::path::Path;
use std::time::Duration;

use llm_gateway::{normalize_endpoint, GatewayConfig, DEFAULT_TIMEOUT};

use crate::error::ConfigError;
use crate::storage::ObjectLocation;

pub const DEFAULT_TEXT_COLUMN: &str = "text";

pub const SOURCE_BUCKET: &str = "S3_SOURCE_BUCKET";
pub const SOURCE_KEY: &str = "S3_SOURCE_KEY";
pub const DESTINATION_BUCKET: &str = "S3_DESTINATION_BUCKET";
pub const DESTINATION_KEY: &str = "S3_DESTINATION_KEY";
pub const GATEWAY_URL: &str = "SECRET_LLM_GATEWAY_URL";
pub const GATEWAY_API_KEY: &str = "SECRET_LLM_GATEWAY_API_KEY";
pub const GATEWAY_MODEL: &str = "LLM_GATEWAY_MODEL";
pub const GATEWAY_TIMEOUT_SECS: &str = "LLM_GATEWAY_TIMEOUT_SECS";
pub const TEXT_COLUMN: &str = "TEXT_COLUMN";
pub const AWS_REGION: &str = "AWS_REGION";
pub const S3_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";

#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Values supplied on the command line. They win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source: Option<ObjectLocation>,
    pub destination: Option<ObjectLocation>,
    pub text_column: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JobConfig {
    pub source: ObjectLocation,
    pub destination: ObjectLocation,
    pub text_column: String,
    pub gateway: GatewayConfig,
    pub storage: StorageSettings,
}

impl JobConfig {
    pub fn from_env(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Builds the configuration from any key lookup. Blank values count as
    /// unset, and every problem found is reported in one error.
    pub fn from_lookup<F>(lookup: F, overrides: &ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut problems = Vec::new();

        let source = match &overrides.source {
            Some(location) => Some(location.clone()),
            None => location_from(&get, SOURCE_BUCKET, SOURCE_KEY, &mut problems),
        };
        let destination = match &overrides.destination {
            Some(location) => Some(location.clone()),
            None => location_from(&get, DESTINATION_BUCKET, DESTINATION_KEY, &mut problems),
        };

        let endpoint = match get(GATEWAY_URL) {
            Some(raw) => match normalize_endpoint(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    problems.push(format!("{}: {}", GATEWAY_URL, e));
                    None
                }
            },
            None => {
                problems.push(format!("{} is not set", GATEWAY_URL));
                None
            }
        };

        let timeout = match get(GATEWAY_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    problems.push(format!(
                        "{} must be a positive number of seconds, got '{}'",
                        GATEWAY_TIMEOUT_SECS, raw
                    ));
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let text_column = overrides
            .text_column
            .clone()
            .filter(|column| !column.is_empty())
            .or_else(|| get(TEXT_COLUMN))
            .unwrap_or_else(|| DEFAULT_TEXT_COLUMN.to_string());

        let (source, destination, endpoint) = match (source, destination, endpoint) {
            (Some(source), Some(destination), Some(endpoint)) if problems.is_empty() => {
                (source, destination, endpoint)
            }
            _ => return Err(ConfigError::Invalid(problems)),
        };

        let mut gateway = GatewayConfig::new(endpoint).with_timeout(timeout);
        if let Some(api_key) = get(GATEWAY_API_KEY) {
            gateway = gateway.with_api_key(api_key);
        }
        if let Some(model) = get(GATEWAY_MODEL) {
            gateway = gateway.with_model(model);
        }

        Ok(Self {
            source,
            destination,
            text_column,
            gateway,
            storage: StorageSettings {
                region: get(AWS_REGION),
                endpoint_url: get(S3_ENDPOINT_URL),
            },
        })
    }
}

fn location_from<G>(
    get: &G,
    bucket_key: &str,
    object_key: &str,
    problems: &mut Vec<String>,
) -> Option<ObjectLocation>
where
    G: Fn(&str) -> Option<String>,
{
    let bucket = get(bucket_key);
    let key = get(object_key);

    if bucket.is_none() {
        problems.push(format!("{} is not set", bucket_key));
    }
    if key.is_none() {
        problems.push(format!("{} is not set", object_key));
    }

    Some(ObjectLocation::new(bucket?, key?))
}

/// Loads an explicit env file, or a `.env` in the working directory when
/// one exists.
pub fn load_env_file(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    Ok(())
}
