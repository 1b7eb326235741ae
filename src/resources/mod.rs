//! ECS resources made available to systems.
//!
//! Overview
//! - `agentskins` – player textures per color theme
//! - `camera2d` – shared 2D camera, hard-followed by the agent system
//! - `renderorder` – depth-sorted paint order produced by the animation system
//! - `simconfig` – INI-backed simulation settings and agent tunables
//! - `texturestore` – texture handles and pixel bounds
//! - `tilemap` – tile grid, classifiers, collision oracle and level loading
//! - `worldtime` – simulation time and delta
pub mod agentskins;
pub mod camera2d;
pub mod renderorder;
pub mod simconfig;
pub mod texturestore;
pub mod tilemap;
pub mod worldtime;
