//! tilerun simulation library.
//!
//! Per-frame simulation of a 2D tile platformer driven by discrete actions,
//! built for deterministic agent-control rollouts.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (transform, sprite, animation, patrol, agent, hull)
//! - [`game`] – world setup for a level
//! - [`geometry`] – vectors, rectangles and the rotated bounding box helper
//! - [`pipeline`] – the fixed-order step pipeline and rollout helper
//! - [`resources`] – ECS resources (tile map oracle, camera, textures, config)
//! - [`systems`] – ECS systems (animation, patrol, agent, render passes)

pub mod components;
pub mod game;
pub mod geometry;
pub mod pipeline;
#[cfg(feature = "raylib")]
pub mod raylib_canvas;
pub mod resources;
pub mod systems;
