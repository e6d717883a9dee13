//! An in-process `ResourceStore` backed by a mutex-guarded map.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::StorageError;
use crate::store::ResourceStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, StorageError> {
        self.resources
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("memory store lock poisoned: {}", e)))
    }

    pub fn contains(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.lock()?.contains_key(name))
    }

    pub fn remove(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.lock()?.remove(name))
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.lock()?.is_empty())
    }
}

impl ResourceStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        self.lock()?
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                resource: name.to_string(),
            })
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.lock()?.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}
