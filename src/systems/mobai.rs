//! Patrol system for non-player mobs.
//!
//! A mob walks at its constant [`MobAi::velocity_x`] and turns around at walls
//! and at ledges. Both are found through the tile oracle with three sensor
//! boxes placed relative to the mob's position after it moved:
//!
//! - the wall sensor, ahead at head height, treats wall tiles as solid;
//! - the left and right floor sensors, just below the feet, treat *empty*
//!   tiles as solid. A floor sensor reaching over a gap is pushed back out
//!   of it, which reads the same as bumping into a wall.
//!
//! The horizontal parts of the three corrections are summed and applied. A
//! non-zero sum pointing against the walking direction flips the direction.

use bevy_ecs::prelude::*;

use crate::components::mobai::MobAi;
use crate::components::transform::Transform;
use crate::geometry::Rectangle;
use crate::resources::tilemap::{TileOracle, classify_gaps, classify_walls};
use crate::resources::worldtime::WorldTime;

/// Sensor boxes relative to the mob position.
pub const WALL_SENSOR: Rectangle = Rectangle::new(0.5, -1.1, 1.0, 0.5);
pub const FLOOR_SENSOR_LEFT: Rectangle = Rectangle::new(-0.5, 0.1, 1.0, 0.8);
pub const FLOOR_SENSOR_RIGHT: Rectangle = Rectangle::new(1.5, 0.1, 1.0, 0.8);

/// Move one mob by `dt` and resolve it against the oracle.
pub fn step_mob<O: TileOracle + ?Sized>(
    mob: &mut MobAi,
    transform: &mut Transform,
    oracle: &O,
    dt: f32,
) {
    transform.position.x += mob.velocity_x * dt;

    let position = transform.position;
    let wall_offset = oracle.collision_offset(&WALL_SENSOR.translated(position), &classify_walls);
    let floor_offset_left =
        oracle.collision_offset(&FLOOR_SENSOR_LEFT.translated(position), &classify_gaps);
    let floor_offset_right =
        oracle.collision_offset(&FLOOR_SENSOR_RIGHT.translated(position), &classify_gaps);

    let delta_x = wall_offset.x + floor_offset_left.x + floor_offset_right.x;

    transform.position.x += delta_x;

    if delta_x != 0.0 && (delta_x > 0.0) != (mob.velocity_x > 0.0) {
        mob.velocity_x = -mob.velocity_x; // Rebound
    }
}

/// Patrol every [`MobAi`] entity against the oracle resource `O`.
pub fn mob_ai<O: TileOracle + Resource>(
    mut query: Query<(&mut MobAi, &mut Transform)>,
    oracle: Res<O>,
    time: Res<WorldTime>,
) {
    for (mut mob, mut transform) in query.iter_mut() {
        step_mob(&mut mob, &mut transform, &*oracle, time.delta);
    }
}
