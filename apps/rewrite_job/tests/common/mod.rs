#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use llm_gateway::{TextTransformer, TransformerFailure};
use parking_lot::Mutex;
use rewrite_job::{
    config::{ConfigOverrides, JobConfig},
    error::StorageError,
    storage::{InMemoryObjectStore, ObjectLocation, ObjectStore},
};

pub fn source() -> ObjectLocation {
    ObjectLocation::new("input-bucket", "input-data.csv")
}

pub fn destination() -> ObjectLocation {
    ObjectLocation::new("output-bucket", "output-data.csv")
}

pub fn job_config(gateway_url: &str) -> JobConfig {
    let env: HashMap<&str, String> = HashMap::from([
        ("S3_SOURCE_BUCKET", source().bucket),
        ("S3_SOURCE_KEY", source().key),
        ("S3_DESTINATION_BUCKET", destination().bucket),
        ("S3_DESTINATION_KEY", destination().key),
        ("SECRET_LLM_GATEWAY_URL", gateway_url.to_string()),
    ]);
    JobConfig::from_lookup(|key| env.get(key).cloned(), &ConfigOverrides::default())
        .expect("test configuration is complete")
}

pub fn store_with_source(csv: &str) -> Arc<InMemoryObjectStore> {
    let store = Arc::new(InMemoryObjectStore::new());
    store.insert(source(), csv);
    store
}

pub fn destination_text(store: &InMemoryObjectStore) -> Option<String> {
    store
        .object(&destination())
        .map(|bytes| String::from_utf8(bytes).expect("destination is UTF-8"))
}

/// Looks the input up in a fixed table; anything not listed fails.
pub struct TableTransformer {
    replacements: HashMap<String, String>,
    calls: AtomicUsize,
}

impl TableTransformer {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            replacements: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextTransformer for TableTransformer {
    async fn try_transform(&self, text: &str) -> Result<String, TransformerFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replacements
            .get(text)
            .cloned()
            .ok_or(TransformerFailure::MissingField)
    }
}

/// Store whose writes always fail.
pub struct ReadOnlyStore {
    pub inner: Arc<InMemoryObjectStore>,
}

#[async_trait]
impl ObjectStore for ReadOnlyStore {
    async fn get_object(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError> {
        self.inner.get_object(location).await
    }

    async fn put_object(
        &self,
        _location: &ObjectLocation,
        _body: Vec<u8>,
    ) -> Result<(), StorageError> {
        Err(StorageError::Request("AccessDenied".to_string()))
    }
}

/// Collects formatted log output so tests can assert on emitted events.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Installs a plain-text subscriber for warn and error events on the
    /// current thread until the guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines_at(&self, level: &str) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock())
            .lines()
            .filter(|line| line.split_whitespace().any(|word| word == level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
