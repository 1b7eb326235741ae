use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::geometry::Vector2;

/// Velocity of the player agent in world units per second.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dynamics {
    pub velocity: Vector2,
}
