use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Patrol behaviour: constant horizontal speed in world units per second.
/// The sign is the patrol direction and flips when the actor rebounds off a
/// wall or a ledge.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MobAi {
    pub velocity_x: f32,
}

impl MobAi {
    pub fn new(velocity_x: f32) -> Self {
        Self { velocity_x }
    }
}
