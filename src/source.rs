// In: src/source.rs

//! Defines the uniform read/write contract every pipeline component satisfies,
//! the `BaseSource` adapter at the bottom of every chain, and the generic
//! `Layer` decorator that wraps one inner source with one `Transform`.
//!
//! Data Flow:
//!
//!   write(payload) -> Layer.encode -> inner.write -> ... -> BaseSource -> store
//!   read()         <- Layer.decode <- inner.read  <- ... <- BaseSource <- store
//!
//! A layer never inspects or rewrites errors from its inner source; it only
//! raises errors from its own encode/decode step.

use crate::error::PipelineError;
use crate::store::ResourceStore;
use crate::transform::Transform;

//==================================================================================
// I. The Contract
//==================================================================================

/// Whole-buffer read/write access to one resource.
pub trait DataSource: Send {
    fn write(&mut self, payload: &[u8]) -> Result<(), PipelineError>;
    fn read(&self) -> Result<Vec<u8>, PipelineError>;
}

impl<D: DataSource + ?Sized> DataSource for Box<D> {
    fn write(&mut self, payload: &[u8]) -> Result<(), PipelineError> {
        (**self).write(payload)
    }

    fn read(&self) -> Result<Vec<u8>, PipelineError> {
        (**self).read()
    }
}

//==================================================================================
// II. Base Source
//==================================================================================

/// Binds a store to one fixed resource name. Performs no transformation.
#[derive(Debug, Clone)]
pub struct BaseSource<S> {
    store: S,
    resource: String,
}

impl<S: ResourceStore> BaseSource<S> {
    pub fn new(store: S, resource: impl Into<String>) -> Self {
        Self {
            store,
            resource: resource.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ResourceStore> DataSource for BaseSource<S> {
    fn write(&mut self, payload: &[u8]) -> Result<(), PipelineError> {
        log::trace!("base '{}': persisting {} bytes", self.resource, payload.len());
        self.store.write(&self.resource, payload)?;
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>, PipelineError> {
        let raw = self.store.read(&self.resource)?;
        log::trace!("base '{}': loaded {} bytes", self.resource, raw.len());
        Ok(raw)
    }
}

//==================================================================================
// III. Transform Layer
//==================================================================================

/// Wraps exactly one inner source: encodes before delegating a write, decodes
/// after delegating a read.
#[derive(Debug)]
pub struct Layer<I> {
    transform: Transform,
    inner: I,
}

impl<I: DataSource> Layer<I> {
    pub fn new(transform: Transform, inner: I) -> Self {
        Self { transform, inner }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Releases the layer, handing back its inner source.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: DataSource> DataSource for Layer<I> {
    fn write(&mut self, payload: &[u8]) -> Result<(), PipelineError> {
        let encoded = self.transform.encode(payload)?;
        log::debug!(
            "{}: encoded {} -> {} bytes",
            self.transform.name(),
            payload.len(),
            encoded.len()
        );
        self.inner.write(&encoded)
    }

    fn read(&self) -> Result<Vec<u8>, PipelineError> {
        let raw = self.inner.read()?;
        let decoded = self.transform.decode(&raw)?;
        log::debug!(
            "{}: decoded {} -> {} bytes",
            self.transform.name(),
            raw.len(),
            decoded.len()
        );
        Ok(decoded)
    }
}
