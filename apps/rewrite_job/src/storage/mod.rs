use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::error::{LocationParseError, StorageError};

pub mod memory;
pub mod s3;

pub use memory::InMemoryObjectStore;
pub use s3::S3ObjectStore;

const SCHEME_PREFIX: &str = "s3://";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", SCHEME_PREFIX, self.bucket, self.key)
    }
}

impl FromStr for ObjectLocation {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| LocationParseError {
            input: s.to_string(),
            reason,
        };

        let rest = s
            .strip_prefix(SCHEME_PREFIX)
            .ok_or_else(|| fail("expected s3://bucket/key"))?;
        let (bucket, key) = rest
            .split_once('/')
            .ok_or_else(|| fail("missing object key"))?;

        if bucket.is_empty() {
            return Err(fail("missing bucket"));
        }
        if key.is_empty() {
            return Err(fail("missing object key"));
        }

        Ok(Self::new(bucket, key))
    }
}

/// Whole-object get/put by bucket and key. No streaming, no versioning.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError>;

    /// Overwrites any existing object at `location`.
    async fn put_object(&self, location: &ObjectLocation, body: Vec<u8>)
        -> Result<(), StorageError>;
}
