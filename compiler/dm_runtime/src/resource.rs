//! Resource loader boundary.
//!
//! Compiled definitions refer to icons, sounds and other files by resource
//! path (`'icons/mob.dmi'`). Loading maps such a path to a `DreamResource`
//! handle. Loading never reads file contents; `read_bytes` does, on demand.

use crate::errors::ResourceError;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A file referenced by the running program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DreamResource {
    resource_path: String,
    file_path: PathBuf,
}

impl DreamResource {
    pub fn new(resource_path: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        DreamResource {
            resource_path: resource_path.into(),
            file_path: file_path.into(),
        }
    }

    /// The path as written in the program.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn exists(&self) -> bool {
        self.file_path.is_file()
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, ResourceError> {
        std::fs::read(&self.file_path).map_err(|source| ResourceError::Io {
            path: self.file_path.clone(),
            source,
        })
    }
}

/// Maps resource paths to loaded resources.
pub trait ResourceLoader: Send + Sync {
    fn load_resource(&self, resource_path: &str) -> Result<Arc<DreamResource>, ResourceError>;
}

/// Resolves resource paths against a root directory.
///
/// Each path is resolved once; later loads return the cached handle.
#[derive(Debug)]
pub struct FileResourceLoader {
    root: PathBuf,
    cache: RwLock<FxHashMap<String, Arc<DreamResource>>>,
}

impl FileResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileResourceLoader {
            root: root.into(),
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cached_count(&self) -> usize {
        self.cache.read().len()
    }
}

impl ResourceLoader for FileResourceLoader {
    fn load_resource(&self, resource_path: &str) -> Result<Arc<DreamResource>, ResourceError> {
        if let Some(resource) = self.cache.read().get(resource_path) {
            return Ok(Arc::clone(resource));
        }

        // Resources live under the root; reject absolute and `..` paths.
        let relative = Path::new(resource_path);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(ResourceError::OutsideRoot {
                path: resource_path.to_string(),
            });
        }

        let resource = Arc::new(DreamResource::new(resource_path, self.root.join(relative)));
        tracing::trace!(resource = resource_path, "loaded resource");
        Ok(Arc::clone(
            self.cache
                .write()
                .entry(resource_path.to_string())
                .or_insert(resource),
        ))
    }
}
