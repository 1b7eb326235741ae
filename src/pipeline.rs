//! Fixed-order step pipeline.
//!
//! [`Simulation`] owns the ECS world and the schedule, and makes the step
//! ordering explicit. Each step first writes the agent action and advances
//! time with `update_world_time` directly on the world, then runs the chained
//! schedule:
//!
//! 1. animation and paint order
//! 2. patrol mobs
//! 3. player agent and camera
//!
//! then, optionally, one or more renders that consume the paint order of that
//! step. [`StepPhase`] tracks whether the world has been stepped since it was
//! built; rendering a world that was never stepped is refused because its
//! paint order does not exist yet.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::{debug, info};
use serde::Serialize;

use crate::components::agent::Agent;
use crate::components::dynamics::Dynamics;
use crate::components::transform::Transform;
use crate::game::setup_world;
use crate::geometry::Vector2;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::simconfig::SimConfig;
use crate::resources::tilemap::{Level, TileMap, TileSet};
use crate::systems::agent::agent_controller;
use crate::systems::animation::animation;
use crate::systems::mobai::mob_ai;
use crate::systems::render::{
    Canvas, SpriteRenderMode, render_agent, render_sprites, render_tiles,
};
use crate::systems::time::update_world_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    /// Built or reset, no step has run.
    Idle,
    /// At least one step has run; the paint order is current.
    Updated,
}

/// Snapshot of the player after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentState {
    pub position: Vector2,
    pub velocity: Vector2,
    pub on_ground: bool,
    pub action: u8,
}

/// Draw counts of one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub behind: usize,
    pub tiles: usize,
    pub in_front: usize,
    pub agent: bool,
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
    level: Level,
    config: SimConfig,
    agent: Entity,
    phase: StepPhase,
}

fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            animation,
            mob_ai::<TileMap>,
            agent_controller::<TileMap>,
        )
            .chain(),
    );
    schedule
}

impl Simulation {
    pub fn new(level: Level, config: SimConfig) -> Result<Self, String> {
        let mut world = World::new();
        let agent = setup_world(&mut world, &level, &config)?;
        Ok(Self {
            world,
            schedule: build_schedule(),
            level,
            config,
            agent,
            phase: StepPhase::Idle,
        })
    }

    /// Rebuild the world from the stored level and configuration.
    pub fn reset(&mut self) -> Result<AgentState, String> {
        let mut world = World::new();
        self.agent = setup_world(&mut world, &self.level, &self.config)?;
        self.world = world;
        self.schedule = build_schedule();
        self.phase = StepPhase::Idle;
        debug!("Simulation reset");
        Ok(self.agent_state())
    }

    /// Apply `action` to the agent and advance one fixed timestep.
    pub fn step(&mut self, action: u8) -> AgentState {
        self.step_with_dt(action, self.config.timestep)
    }

    /// Apply `action` and advance by `dt` seconds.
    pub fn step_with_dt(&mut self, action: u8, dt: f32) -> AgentState {
        if let Some(mut agent) = self.world.get_mut::<Agent>(self.agent) {
            agent.action = action;
        }
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.phase = StepPhase::Updated;
        self.agent_state()
    }

    /// Draw the current step: sprites behind the tiles, tiles, sprites in
    /// front, then the agent with skin `theme`.
    pub fn render(&mut self, canvas: &mut impl Canvas, theme: usize) -> Result<RenderStats, String> {
        if self.phase != StepPhase::Updated {
            return Err("Cannot render before the first simulation step".to_string());
        }

        let camera = self.world.resource::<Camera2DRes>().0;
        let camera_box = camera.view_box(self.config.view_width, self.config.view_height);

        let behind = render_sprites(
            &self.world,
            canvas,
            &camera_box,
            SpriteRenderMode::NegativeZ,
        );
        let tiles = render_tiles(
            self.world.resource::<TileMap>(),
            self.world.resource::<TileSet>(),
            canvas,
            &camera_box,
        );
        let in_front = render_sprites(
            &self.world,
            canvas,
            &camera_box,
            SpriteRenderMode::PositiveZ,
        );
        let agent = render_agent(&mut self.world, canvas, theme);

        Ok(RenderStats {
            behind,
            tiles,
            in_front,
            agent,
        })
    }

    pub fn agent_state(&self) -> AgentState {
        let transform = self.world.get::<Transform>(self.agent).copied().unwrap_or_default();
        let dynamics = self.world.get::<Dynamics>(self.agent).copied().unwrap_or_default();
        let agent = self.world.get::<Agent>(self.agent).copied().unwrap_or_default();
        AgentState {
            position: transform.position,
            velocity: dynamics.velocity,
            on_ground: agent.on_ground,
            action: agent.action,
        }
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    pub fn agent(&self) -> Entity {
        self.agent
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

/// Run `steps` steps, taking the action for each step from `policy`, and
/// return the final agent state.
pub fn rollout(
    sim: &mut Simulation,
    steps: usize,
    mut policy: impl FnMut(usize, &AgentState) -> u8,
) -> AgentState {
    let mut state = sim.agent_state();
    for i in 0..steps {
        let action = policy(i, &state);
        state = sim.step(action);
    }
    info!(
        "Rollout of {} steps finished at ({:.3}, {:.3})",
        steps, state.position.x, state.position.y
    );
    state
}
