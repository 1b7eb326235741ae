//! Player agent controller.
//!
//! Each step the single [`Agent`] entity:
//!
//! 1. decodes its action code into horizontal intent, jump and fall-through;
//! 2. blends horizontal velocity toward `max_speed * movement_x`, with reduced
//!    control in the air, snapping small residues to zero;
//! 3. jumps (vertical impulse), or marks the tiles it stands in as
//!    non-colliding when falling through;
//! 4. applies gravity while airborne and caps vertical speed at `max_jump`;
//! 5. releases fall-through tiles that are no longer near it;
//! 6. integrates its position and resolves it against the tile oracle;
//! 7. derives `on_ground` from the vertical correction and moves the camera
//!    target onto itself.
//!
//! More than one agent, or none, is a setup bug and panics.

use bevy_ecs::prelude::*;

use crate::components::agent::Agent;
use crate::components::collision::Collision;
use crate::components::dynamics::Dynamics;
use crate::components::transform::Transform;
use crate::geometry::Rectangle;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::simconfig::AgentTuning;
use crate::resources::tilemap::{TileOracle, classify_agent};
use crate::resources::worldtime::WorldTime;

/// Half extent of the square around the agent inside which fall-through tiles
/// stay disabled.
pub const NO_COLLIDE_REACH: f32 = 8.0;

/// Advance one agent by `dt` seconds.
pub fn step_agent<O: TileOracle + ?Sized>(
    agent: &mut Agent,
    transform: &mut Transform,
    dynamics: &mut Dynamics,
    collision: &Collision,
    oracle: &mut O,
    tuning: &AgentTuning,
    dt: f32,
) {
    // Hull before moving, used to keep the tiles being dropped through masked.
    let world_collision = collision.world_bounds(transform.position);

    let effects = agent.effects();

    let mix_x = if agent.on_ground {
        tuning.mix
    } else {
        tuning.mix * tuning.air_control
    };

    let velocity = &mut dynamics.velocity;
    velocity.x += mix_x * (tuning.max_speed * effects.movement_x - velocity.x);

    if velocity.x.abs() < mix_x * tuning.max_speed {
        velocity.x = 0.0;
    }

    if effects.jump {
        velocity.y = -tuning.max_jump;
    } else if effects.fallthrough {
        oracle.set_no_collide(transform.position.x, transform.position.y);
    }

    if !agent.on_ground {
        velocity.y -= tuning.gravity * dt;
    }

    // Max fall speed is jump speed
    if velocity.y.abs() > tuning.max_jump {
        velocity.y = velocity.y.signum() * tuning.max_jump;
    }

    let region = Rectangle::new(
        transform.position.x - NO_COLLIDE_REACH,
        transform.position.y - NO_COLLIDE_REACH,
        NO_COLLIDE_REACH * 2.0,
        NO_COLLIDE_REACH * 2.0,
    );
    oracle.update_no_collide(&world_collision, &region);

    transform.position.x += velocity.x * dt;
    transform.position.y += velocity.y * dt;

    let offset = oracle.collision_offset(
        &collision.world_bounds(transform.position),
        &classify_agent,
    );

    agent.on_ground = offset.y >= 0.0;

    transform.position += offset;
}

/// Run [`step_agent`] on the single agent entity and point the camera at it.
pub fn agent_controller<O: TileOracle + Resource>(
    mut query: Query<(&mut Agent, &mut Transform, &mut Dynamics, &Collision)>,
    mut oracle: ResMut<O>,
    mut camera: ResMut<Camera2DRes>,
    tuning: Res<AgentTuning>,
    time: Res<WorldTime>,
) {
    let (mut agent, mut transform, mut dynamics, collision) = match query.single_mut() {
        Ok(items) => items,
        Err(e) => panic!("agent controller expects exactly one agent entity: {e}"),
    };

    step_agent(
        &mut agent,
        &mut transform,
        &mut dynamics,
        collision,
        &mut *oracle,
        &tuning,
        time.delta,
    );

    // Camera follows the agent
    camera.0.target = transform.position;
}
