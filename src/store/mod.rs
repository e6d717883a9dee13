// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Store Layer
// ====================================================================================
//
// A `ResourceStore` is the persistent collaborator underneath every pipeline. It
// holds opaque byte sequences addressed by a resource name and nothing more:
// no transforms, no retries, no caching.
//
//   [Pipeline] -> [Layer] -> ... -> [BaseSource] --(name, bytes)--> [ResourceStore]
//
// Stores take `&self` for both operations. Whatever consistency they offer under
// concurrent access is their own; the pipeline adds no locking on top.
// ====================================================================================

use std::sync::Arc;

use crate::error::StorageError;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Named byte-sequence storage.
pub trait ResourceStore: Send + Sync {
    /// Returns the full persisted contents of `name`.
    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Replaces the full persisted contents of `name` with `bytes`.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: ResourceStore + ?Sized> ResourceStore for Arc<S> {
    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        (**self).read(name)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(name, bytes)
    }
}
