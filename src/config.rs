// In: src/config.rs

//! A serialisable description of a layer stack.
//!
//! `PipelineConfig` is created once at the application boundary (typically
//! parsed from JSON) and then opened against as many resources as needed. Each
//! `open` assembles a fresh, independent `Pipeline`.
//!
//! ```json
//! {
//!   "layers": [
//!     { "op": "obfuscation" },
//!     { "op": "compression", "params": { "level": 6 } }
//!   ]
//! }
//! ```
//!
//! `layers` lists transforms innermost first: the last entry is the outermost
//! layer and the first to encode on write.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::source::BaseSource;
use crate::store::ResourceStore;
use crate::transform::{CompressionLevel, Transform};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Innermost first.
    #[serde(default)]
    pub layers: Vec<Transform>,
}

impl PipelineConfig {
    /// A config with no layers at all; reads and writes pass straight through.
    pub fn passthrough() -> Self {
        Self { layers: Vec::new() }
    }

    /// Parses a JSON config. Unknown ops, unknown fields and out-of-range
    /// compression levels are all `Config` errors.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Appends `transform` as the new outermost layer.
    pub fn with_layer(mut self, transform: Transform) -> Self {
        self.layers.push(transform);
        self
    }

    /// Assembles a pipeline over `store` bound to `resource`.
    pub fn open<S>(&self, store: S, resource: impl Into<String>) -> Pipeline
    where
        S: ResourceStore + Clone + 'static,
    {
        Pipeline::builder(BaseSource::new(store, resource))
            .wrap_all(self.layers.iter().copied())
            .build()
    }
}

/// The classic stack: compression outermost, obfuscation beneath it.
impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                Transform::Obfuscation,
                Transform::Compression {
                    level: CompressionLevel::default(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_config_is_compression_over_obfuscation() {
        let config = PipelineConfig::default();
        let store = Arc::new(MemoryStore::new());
        let pipeline = config.open(store, "demo");

        let names: Vec<&str> = pipeline.layers().map(|t| t.name()).collect();
        assert_eq!(names, vec!["compression", "obfuscation"]);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "layers": [
                { "op": "compression", "params": { "level": 9 } },
                { "op": "obfuscation" }
            ]
        }"#;
        let config = PipelineConfig::from_json(json).unwrap();
        assert_eq!(
            config,
            PipelineConfig::passthrough()
                .with_layer(Transform::compression(9).unwrap())
                .with_layer(Transform::Obfuscation)
        );
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = PipelineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(PipelineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_config_rejects_invalid_input() {
        let bad_level = r#"{ "layers": [ { "op": "compression", "params": { "level": -1 } } ] }"#;
        let unknown_op = r#"{ "layers": [ { "op": "rot13" } ] }"#;
        let unknown_field = r#"{ "layers": [], "cipher": "aes" }"#;

        for json in [bad_level, unknown_op, unknown_field, "not json"] {
            assert!(
                matches!(PipelineConfig::from_json(json), Err(PipelineError::Config(_))),
                "expected config error for {}",
                json
            );
        }
    }

    #[test]
    fn test_empty_object_is_passthrough() {
        assert_eq!(
            PipelineConfig::from_json("{}").unwrap(),
            PipelineConfig::passthrough()
        );
    }

    #[test]
    fn test_one_config_opens_many_resources() {
        let store = Arc::new(MemoryStore::new());
        let config = PipelineConfig::default();

        let mut first = config.open(Arc::clone(&store), "one.csv");
        let mut second = config.open(Arc::clone(&store), "two.csv");
        first.write_str("alpha").unwrap();
        second.write_str("beta").unwrap();

        assert_eq!(first.read_string().unwrap(), "alpha");
        assert_eq!(second.read_string().unwrap(), "beta");
        assert_eq!(store.len().unwrap(), 2);
    }
}
