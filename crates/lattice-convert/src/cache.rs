//! Asset identity cache.
//!
//! Maps stable identity keys (element ids for geometry, normalized names for
//! materials) to the native objects a previous conversion produced, so
//! repeated imports of the same data reuse assets instead of rebuilding
//! them. Entries live for the whole conversion session.

use std::collections::HashMap;
use std::sync::Arc;

use lattice_native::{NativeMaterial, NativeMesh};
use parking_lot::Mutex;

/// A native object owned by the cache
#[derive(Debug, Clone)]
pub enum CachedAsset {
    Mesh(Arc<NativeMesh>),
    Material(Arc<NativeMaterial>),
}

/// Session-lifetime mapping from identity key to converted native object.
///
/// Not synchronized; wrap it in [`SharedAssetCache`] when several importers
/// run at once.
#[derive(Debug, Default)]
pub struct AssetCache {
    entries: HashMap<String, CachedAsset>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mesh stored under `key`. A material under the same key is a miss.
    pub fn mesh(&self, key: &str) -> Option<Arc<NativeMesh>> {
        match self.entries.get(key) {
            Some(CachedAsset::Mesh(mesh)) => Some(mesh.clone()),
            _ => None,
        }
    }

    /// The material stored under `key`. A mesh under the same key is a miss.
    pub fn material(&self, key: &str) -> Option<Arc<NativeMaterial>> {
        match self.entries.get(key) {
            Some(CachedAsset::Material(material)) => Some(material.clone()),
            _ => None,
        }
    }

    pub fn insert_mesh(&mut self, key: impl Into<String>, mesh: Arc<NativeMesh>) {
        self.entries.insert(key.into(), CachedAsset::Mesh(mesh));
    }

    pub fn insert_material(&mut self, key: impl Into<String>, material: Arc<NativeMaterial>) {
        self.entries
            .insert(key.into(), CachedAsset::Material(material));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An [`AssetCache`] shared between threads behind a mutex
#[derive(Debug, Clone, Default)]
pub struct SharedAssetCache {
    inner: Arc<Mutex<AssetCache>>,
}

impl SharedAssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the cache
    pub fn with<R>(&self, f: impl FnOnce(&mut AssetCache) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
