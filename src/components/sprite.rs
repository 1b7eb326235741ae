use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::tint::Tint;
use crate::geometry::Vector2;
use crate::resources::texturestore::TextureId;

/// Sprite placed relative to the entity's [`Transform`](super::transform::Transform).
///
/// `position`, `rotation` and `scale` are local to the transform. `z` is the
/// paint-order key: negative values are drawn behind the tile layer,
/// non-negative values in front of it.
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub position: Vector2,
    pub rotation: f32,
    pub scale: f32,
    pub z: f32,
    pub tint: Tint,
    pub texture: TextureId,
}

impl Sprite {
    pub fn new(texture: TextureId, z: f32) -> Self {
        Self {
            position: Vector2::zero(),
            rotation: 0.0,
            scale: 1.0,
            z,
            tint: Tint::WHITE,
            texture,
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.position = offset;
        self
    }
}
