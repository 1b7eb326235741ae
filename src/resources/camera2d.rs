//! Shared 2D camera resource.
//!
//! The agent system hard-follows the agent by writing the camera target each
//! step. Rendering derives the visible world rectangle from it for culling.

use bevy_ecs::prelude::Resource;

use crate::geometry::{Rectangle, Vector2};

/// Camera parameters in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// World point shown at the center of the view.
    pub target: Vector2,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            target: Vector2::zero(),
            zoom: 1.0,
        }
    }
}

impl Camera2D {
    /// World-space rectangle seen by a view `view_width` by `view_height`
    /// units in size at zoom 1.
    pub fn view_box(&self, view_width: f32, view_height: f32) -> Rectangle {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        let w = view_width / zoom;
        let h = view_height / zoom;
        Rectangle::new(self.target.x - w * 0.5, self.target.y - h * 0.5, w, h)
    }
}

/// ECS resource that holds the active 2D camera.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Camera2DRes(pub Camera2D);
