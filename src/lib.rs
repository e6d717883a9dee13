//! This file is the root of the `cloak_store` Rust crate.
//!
//! `cloak_store` wraps a named byte store in a stack of invertible layers
//! (deflate compression, byte-shift obfuscation), each framed as base64 text.
//! Writes encode from the outermost layer inward; reads decode in exact mirror
//! order, so `read()` after `write(data)` always returns `data`.
//!
//! ```
//! use std::sync::Arc;
//! use cloak_store::{BaseSource, MemoryStore, Pipeline, Transform};
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut pipeline = Pipeline::builder(BaseSource::new(Arc::clone(&store), "payroll.csv"))
//!     .wrap(Transform::obfuscation())
//!     .wrap(Transform::compression(6)?)
//!     .build();
//!
//! pipeline.write_str("Name,Salary\nJohn Smith,100000")?;
//! assert_eq!(pipeline.read_string()?, "Name,Salary\nJohn Smith,100000");
//! assert!(pipeline.read_raw()?.is_ascii());
//! # Ok::<(), cloak_store::PipelineError>(())
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod error;
pub mod kernels;
pub mod logging;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod transform;


//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::PipelineConfig;
pub use error::{PipelineError, StorageError};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use source::{BaseSource, DataSource, Layer};
pub use store::{FileStore, MemoryStore, ResourceStore};
pub use transform::{CompressionLevel, Transform};
