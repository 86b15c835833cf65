use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use super::{ObjectLocation, ObjectStore};
use crate::error::StorageError;

/// Map-backed store used in tests.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<ObjectLocation, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, location: ObjectLocation, body: impl Into<Vec<u8>>) {
        self.objects.lock().insert(location, body.into());
    }

    pub fn object(&self, location: &ObjectLocation) -> Option<Vec<u8>> {
        self.objects.lock().get(location).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get_object(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError> {
        self.object(location).ok_or(StorageError::NotFound)
    }

    async fn put_object(
        &self,
        location: &ObjectLocation,
        body: Vec<u8>,
    ) -> Result<(), StorageError> {
        self.insert(location.clone(), body);
        Ok(())
    }
}
