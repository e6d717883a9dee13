//! A `ResourceStore` that maps resource names to files under one root directory.
//!
//! Names are relative paths. Anything that could resolve outside the root
//! (absolute paths, `..`, drive prefixes) is rejected before touching the disk.
//! Each `read`/`write` opens and closes its own handle; nothing stays open
//! between calls.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;
use crate::store::ResourceStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `name` to a path inside the root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let invalid = |reason: &str| StorageError::InvalidName {
            resource: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        let relative = Path::new(name);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("'..' is not allowed")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("name must be relative"))
                }
            }
        }
        if relative.file_name().is_none() {
            return Err(invalid("name does not denote a file"));
        }
        Ok(self.root.join(relative))
    }
}

fn io_error(name: &str, source: std::io::Error) -> StorageError {
    if source.kind() == ErrorKind::NotFound {
        StorageError::NotFound {
            resource: name.to_string(),
        }
    } else {
        StorageError::Io {
            resource: name.to_string(),
            source,
        }
    }
}

impl ResourceStore for FileStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(name)?;
        fs::read(&path).map_err(|e| io_error(name, e))
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                resource: name.to_string(),
                source,
            })?;
        }
        fs::write(&path, bytes).map_err(|source| StorageError::Io {
            resource: name.to_string(),
            source,
        })?;
        log::trace!("file store wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
