//! Solid hull used for tile queries.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::geometry::{Rectangle, Vector2};

/// Axis-aligned box relative to the owning entity's
/// [`Transform`](super::transform::Transform) position.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub bounds: Rectangle,
}

impl Collision {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Rectangle::new(x, y, width, height),
        }
    }

    /// Hull in world space for an entity at `position`.
    pub fn world_bounds(&self, position: Vector2) -> Rectangle {
        self.bounds.translated(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_bounds_translates() {
        let c = Collision::new(-0.5, -1.0, 1.0, 2.0);
        let r = c.world_bounds(Vector2::new(3.0, 4.0));
        assert_eq!(r, Rectangle::new(2.5, 3.0, 1.0, 2.0));
    }
}
