//! Simulation systems.
//!
//! Submodules overview
//! - [`agent`] – player controller: action decoding, motion, tile resolution, camera follow
//! - [`animation`] – advance sprite animations and rebuild the depth-sorted paint order
//! - [`mobai`] – patrol mobs that turn around at walls and ledges
//! - [`render`] – sprite passes split by depth sign, tile layer and agent drawing
//! - [`time`] – update simulation time and delta

pub mod agent;
pub mod animation;
pub mod mobai;
pub mod render;
pub mod time;
