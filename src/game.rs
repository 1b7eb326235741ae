//! World setup for a level.
//!
//! [`setup_world`] inserts every resource the systems read and spawns the
//! level's actors: the single player agent and one patrol mob per spawn
//! point. The agent has no [`Sprite`]; it is drawn by
//! [`render_agent`](crate::systems::render::render_agent).

use bevy_ecs::prelude::*;
use log::info;

use crate::components::agent::Agent;
use crate::components::animation::Animation;
use crate::components::collision::Collision;
use crate::components::dynamics::Dynamics;
use crate::components::mobai::MobAi;
use crate::components::sprite::Sprite;
use crate::components::transform::Transform;
use crate::geometry::{Rectangle, Vector2};
use crate::resources::agentskins::AgentSkins;
use crate::resources::camera2d::{Camera2D, Camera2DRes};
use crate::resources::renderorder::RenderOrder;
use crate::resources::simconfig::SimConfig;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilemap::{Level, TileSet};
use crate::resources::worldtime::WorldTime;

/// Player hull relative to the agent position. The position sits one unit
/// above the feet.
pub const AGENT_HULL: Rectangle = Rectangle::new(-0.4, -1.0, 0.8, 2.0);

/// Depth key of patrol mobs: in front of the tile layer.
pub const MOB_Z: f32 = 1.0;

const MOB_FRAMES: [&str; 2] = [
    "assets/kenney/Enemies/slimeWalk1.png",
    "assets/kenney/Enemies/slimeWalk2.png",
];
const MOB_TEXTURE_PIXELS: u32 = 64;

/// Level used when no level file is given.
pub const DEFAULT_LEVEL: [&str; 10] = [
    "##########################",
    "#........................#",
    "#........................#",
    "#...........====.........#",
    "#........................#",
    "#......====........M.....#",
    "#.............^^^^^^^^^..#",
    "#.A......M....#######....#",
    "^^^^^^^^^^^^^^###########^",
    "##########################",
];

/// Agent position for a spawn tile: centered on the tile, feet on its bottom
/// edge.
pub fn agent_spawn_position(tile: (i32, i32)) -> Vector2 {
    Vector2::new(tile.0 as f32 + 0.5, tile.1 as f32)
}

/// Mob position for a spawn tile: left edge of the tile, standing on the row
/// below.
pub fn mob_spawn_position(tile: (i32, i32)) -> Vector2 {
    Vector2::new(tile.0 as f32, (tile.1 + 1) as f32)
}

/// Insert resources and spawn the actors of `level`. Returns the agent entity.
pub fn setup_world(world: &mut World, level: &Level, config: &SimConfig) -> Result<Entity, String> {
    let mut textures = TextureStore::new();
    let skins = AgentSkins::register(&mut textures);
    let tileset = TileSet::register(&mut textures);
    let mob_frames: Vec<_> = MOB_FRAMES
        .iter()
        .map(|path| textures.register(*path, MOB_TEXTURE_PIXELS, MOB_TEXTURE_PIXELS))
        .collect();

    let agent_position = agent_spawn_position(level.agent_spawn);

    world.insert_resource(WorldTime::default());
    world.insert_resource(level.map.clone());
    world.insert_resource(tileset);
    world.insert_resource(skins);
    world.insert_resource(textures);
    world.insert_resource(RenderOrder::default());
    world.insert_resource(Camera2DRes(Camera2D {
        target: agent_position,
        zoom: 1.0,
    }));
    world.insert_resource(config.agent);
    world.insert_resource(config.clone());

    let agent = world
        .spawn((
            Transform::new(agent_position.x, agent_position.y),
            Agent::new(),
            Dynamics::default(),
            Collision {
                bounds: AGENT_HULL,
            },
        ))
        .id();

    for &tile in level.mob_spawns.iter() {
        let position = mob_spawn_position(tile);
        let animation = Animation::new(mob_frames.clone(), config.mob_frame_rate)?;
        world.spawn((
            Transform::new(position.x, position.y),
            MobAi::new(config.mob_speed),
            Sprite::new(animation.current(), MOB_Z).with_offset(Vector2::new(0.0, -1.0)),
            animation,
        ));
    }

    info!(
        "Level set up: {}x{} tiles, agent at {:?}, {} mobs",
        level.map.width(),
        level.map.height(),
        agent_position,
        level.mob_spawns.len()
    );

    Ok(agent)
}
