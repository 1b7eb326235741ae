use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::geometry::Vector2;

/// World placement of an entity: position in world units, rotation in
/// radians and a uniform scale.
///
/// Written by the patrol and agent systems, read by rendering.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector2,
    pub rotation: f32,
    pub scale: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
