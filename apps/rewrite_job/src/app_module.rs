use std::sync::Arc;

use llm_gateway::{GatewayClient, TextTransformer};

use crate::config::JobConfig;
use crate::storage::{ObjectStore, S3ObjectStore};

#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn ObjectStore>,
    pub transformer: Arc<dyn TextTransformer>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ObjectStore>, transformer: Arc<dyn TextTransformer>) -> Self {
        Self { store, transformer }
    }

    pub async fn from_config(config: &JobConfig) -> Self {
        let store = S3ObjectStore::from_settings(&config.storage).await;
        let transformer = GatewayClient::new(config.gateway.clone());

        Self::new(Arc::new(store), Arc::new(transformer))
    }
}
