// In: src/pipeline.rs

//! Construction-time assembly of a layer chain around one `BaseSource`.
//!
//! The builder is the only place order is decided. Every `wrap` call makes the
//! given transform the new outermost layer:
//!
//! ```text
//! PipelineBuilder::new(base).wrap(A).wrap(B).build()   ==   B(A(Base))
//!
//! write: payload -> B.encode -> A.encode -> store
//! read:  store   -> A.decode -> B.decode -> payload
//! ```
//!
//! Once built, a `Pipeline` cannot be reconfigured. Build a new one to change
//! the layer order or the resource.

use crate::error::PipelineError;
use crate::source::{BaseSource, DataSource, Layer};
use crate::store::ResourceStore;
use crate::transform::Transform;

//==================================================================================
// I. Builder
//==================================================================================

pub struct PipelineBuilder {
    chain: Box<dyn DataSource>,
    raw: Box<dyn DataSource>,
    resource: String,
    /// Innermost first, in `wrap` order.
    layers: Vec<Transform>,
}

impl PipelineBuilder {
    /// Starts a chain with no layers over `base`.
    ///
    /// The store handle is cloned once so the finished pipeline can also read
    /// the persisted wire bytes directly. Pass an `Arc` or a cheaply cloneable
    /// store such as `FileStore`.
    pub fn new<S>(base: BaseSource<S>) -> Self
    where
        S: ResourceStore + Clone + 'static,
    {
        let resource = base.resource().to_string();
        Self {
            raw: Box::new(base.clone()),
            chain: Box::new(base),
            resource,
            layers: Vec::new(),
        }
    }

    /// Makes `transform` the new outermost layer.
    pub fn wrap(mut self, transform: Transform) -> Self {
        self.chain = Box::new(Layer::new(transform, self.chain));
        self.layers.push(transform);
        self
    }

    /// Wraps each transform in order, innermost first.
    pub fn wrap_all<T>(self, transforms: T) -> Self
    where
        T: IntoIterator<Item = Transform>,
    {
        transforms.into_iter().fold(self, PipelineBuilder::wrap)
    }

    pub fn build(self) -> Pipeline {
        log::debug!(
            "assembled pipeline for '{}' with {} layer(s): [{}]",
            self.resource,
            self.layers.len(),
            self.layers
                .iter()
                .rev()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        Pipeline {
            chain: self.chain,
            raw: self.raw,
            resource: self.resource,
            layers: self.layers,
        }
    }
}

//==================================================================================
// II. Pipeline
//==================================================================================

/// An immutable chain of layers bound to one resource.
///
/// A pipeline is `Send` but performs no locking. Callers sharing one across
/// threads must serialise access themselves (e.g. behind a `Mutex`).
pub struct Pipeline {
    chain: Box<dyn DataSource>,
    raw: Box<dyn DataSource>,
    resource: String,
    layers: Vec<Transform>,
}

impl Pipeline {
    pub fn builder<S>(base: BaseSource<S>) -> PipelineBuilder
    where
        S: ResourceStore + Clone + 'static,
    {
        PipelineBuilder::new(base)
    }

    pub fn write(&mut self, payload: &[u8]) -> Result<(), PipelineError> {
        log::debug!("write '{}': {} payload bytes", self.resource, payload.len());
        self.chain.write(payload)
    }

    pub fn read(&self) -> Result<Vec<u8>, PipelineError> {
        let payload = self.chain.read()?;
        log::debug!("read '{}': {} payload bytes", self.resource, payload.len());
        Ok(payload)
    }

    pub fn write_str(&mut self, text: &str) -> Result<(), PipelineError> {
        self.write(text.as_bytes())
    }

    /// Reads and decodes the payload as UTF-8 text.
    pub fn read_string(&self) -> Result<String, PipelineError> {
        String::from_utf8(self.read()?).map_err(|e| PipelineError::decode("utf8", e.to_string()))
    }

    /// Returns the persisted wire bytes, bypassing every layer.
    pub fn read_raw(&self) -> Result<Vec<u8>, PipelineError> {
        self.raw.read()
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Layers from outermost (first to encode) to innermost (last to encode).
    pub fn layers(&self) -> impl Iterator<Item = &Transform> + '_ {
        self.layers.iter().rev()
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl DataSource for Pipeline {
    fn write(&mut self, payload: &[u8]) -> Result<(), PipelineError> {
        Pipeline::write(self, payload)
    }

    fn read(&self) -> Result<Vec<u8>, PipelineError> {
        Pipeline::read(self)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("resource", &self.resource)
            .field("layers", &self.layers().collect::<Vec<_>>())
            .finish()
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    fn base(store: &Arc<MemoryStore>, name: &str) -> BaseSource<Arc<MemoryStore>> {
        BaseSource::new(Arc::clone(store), name)
    }

    #[test]
    fn test_builder_wrap_order_is_outermost_last() {
        let store = Arc::new(MemoryStore::new());
        let pipeline = Pipeline::builder(base(&store, "r"))
            .wrap(Transform::Obfuscation)
            .wrap(Transform::compression(6).unwrap())
            .build();

        let names: Vec<&str> = pipeline.layers().map(|t| t.name()).collect();
        assert_eq!(names, vec!["compression", "obfuscation"]);
        assert_eq!(pipeline.depth(), 2);
    }

    #[test]
    fn test_persisted_bytes_match_manual_composition() {
        let store = Arc::new(MemoryStore::new());
        let outer = Transform::compression(6).unwrap();
        let middle = Transform::Obfuscation;
        let mut pipeline = Pipeline::builder(base(&store, "r"))
            .wrap(middle)
            .wrap(outer)
            .build();

        let payload = b"Name,Salary\nJohn Smith,100000";
        pipeline.write(payload).unwrap();

        // Outer(Middle(Base)) persists Middle.encode(Outer.encode(payload)).
        let expected = middle.encode(&outer.encode(payload).unwrap()).unwrap();
        assert_eq!(store.read("r").unwrap(), expected);
        assert_eq!(pipeline.read_raw().unwrap(), expected);
        assert_eq!(pipeline.read().unwrap(), payload);
    }

    #[test]
    fn test_wrap_all_matches_chained_wraps() {
        let store = Arc::new(MemoryStore::new());
        let transforms = [Transform::Obfuscation, Transform::compression(2).unwrap()];

        let mut chained = Pipeline::builder(base(&store, "a"))
            .wrap(transforms[0])
            .wrap(transforms[1])
            .build();
        let mut folded = Pipeline::builder(base(&store, "b"))
            .wrap_all(transforms)
            .build();

        chained.write(b"same input").unwrap();
        folded.write(b"same input").unwrap();
        assert_eq!(store.read("a").unwrap(), store.read("b").unwrap());
    }

    #[test]
    fn test_pipeline_without_layers_is_the_base_source() {
        let store = Arc::new(MemoryStore::new());
        let mut pipeline = Pipeline::builder(base(&store, "bare")).build();
        pipeline.write(b"\x00raw\xFF").unwrap();
        assert_eq!(store.read("bare").unwrap(), b"\x00raw\xFF");
        assert_eq!(pipeline.read().unwrap(), b"\x00raw\xFF");
        assert_eq!(pipeline.layers().count(), 0);
    }

    #[test]
    fn test_read_string_rejects_invalid_utf8() {
        let store = Arc::new(MemoryStore::new());
        let mut pipeline = Pipeline::builder(base(&store, "bin"))
            .wrap(Transform::Obfuscation)
            .build();
        pipeline.write(&[0xC3, 0x28]).unwrap();

        assert!(matches!(
            pipeline.read_string(),
            Err(PipelineError::Decode { layer: "utf8", .. })
        ));
        assert_eq!(pipeline.read().unwrap(), vec![0xC3, 0x28]);
    }

    #[test]
    fn test_pipeline_can_be_shared_behind_a_mutex() {
        use std::sync::Mutex;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        let pipeline = Arc::new(Mutex::new(
            Pipeline::builder(base(&store, "shared"))
                .wrap(Transform::compression(1).unwrap())
                .build(),
        ));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pipeline = Arc::clone(&pipeline);
                thread::spawn(move || {
                    let mut guard = pipeline.lock().unwrap();
                    let payload = format!("writer {}", i);
                    guard.write_str(&payload).unwrap();
                    assert_eq!(guard.read_string().unwrap(), payload);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
