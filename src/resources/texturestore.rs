//! Texture handles and their pixel bounds.
//!
//! The simulation never touches pixel data. It only needs a stable handle to
//! pass to the draw primitive and the texture's size for culling, which is
//! what [`TextureStore`] keeps. Backends map [`TextureId`]s to real GPU
//! textures on their side.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Texture size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

/// Registry of known textures keyed by handle, plus the path each one was
/// registered from.
#[derive(Resource, Debug, Default)]
pub struct TextureStore {
    pub map: FxHashMap<TextureId, TextureInfo>,
    pub paths: FxHashMap<String, TextureId>,
    next_id: u32,
}

impl TextureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under `path`, returning its handle. Registering the
    /// same path twice returns the existing handle.
    pub fn register(&mut self, path: impl Into<String>, width: u32, height: u32) -> TextureId {
        let path = path.into();
        if let Some(id) = self.paths.get(&path) {
            return *id;
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.map.insert(id, TextureInfo { width, height });
        self.paths.insert(path, id);
        id
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureInfo> {
        self.map.get(&id)
    }

    /// Handle previously registered for `path`.
    pub fn lookup(&self, path: impl AsRef<str>) -> Option<TextureId> {
        self.paths.get(path.as_ref()).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
