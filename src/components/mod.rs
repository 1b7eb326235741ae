//! ECS components for entities.
//!
//! Submodules overview:
//! - [`agent`] – player action code, ground flag and action decoding
//! - [`animation`] – flip-book frame timing for sprites
//! - [`collision`] – solid hull relative to the transform, for tile queries
//! - [`dynamics`] – player velocity
//! - [`mobai`] – patrol direction and speed
//! - [`sprite`] – textured quad with depth key, relative to the transform
//! - [`tint`] – color modulation for draws
//! - [`transform`] – world position, rotation and scale

pub mod agent;
pub mod animation;
pub mod collision;
pub mod dynamics;
pub mod mobai;
pub mod sprite;
pub mod tint;
pub mod transform;
