//! Render passes.
//!
//! Drawing goes through the [`Canvas`] trait so the simulation stays headless;
//! a backend implements it on top of a real graphics API.
//!
//! A frame is drawn back to front:
//!
//! 1. [`render_sprites`] with [`SpriteRenderMode::NegativeZ`] – sprites behind the tiles
//! 2. [`render_tiles`] – the tile layer
//! 3. [`render_sprites`] with [`SpriteRenderMode::PositiveZ`] – sprites in front
//! 4. [`render_agent`] – the player
//!
//! Both sprite passes walk the [`RenderOrder`] built by
//! [`animation`](crate::systems::animation::animation) in the same step; it
//! is sorted ascending by `z`, so the negative pass stops at the first
//! non-negative entry instead of scanning everything.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::agent::Agent;
use crate::components::dynamics::Dynamics;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::transform::Transform;
use crate::geometry::{Rectangle, Vector2, intersects, rotated_scaled_aabb};
use crate::resources::agentskins::AgentSkins;
use crate::resources::renderorder::RenderOrder;
use crate::resources::simconfig::SimConfig;
use crate::resources::texturestore::{TextureId, TextureStore};
use crate::resources::tilemap::{TileId, TileMap, TileSet};

/// Draw primitive.
///
/// `position` is the top-left corner of the texture in world units and
/// `rotation` is in radians. `scale` is the drawn width in world units, the
/// height follows the texture's aspect ratio.
pub trait Canvas {
    fn draw(&mut self, texture: TextureId, position: Vector2, rotation: f32, scale: f32, tint: Tint);
}

/// One recorded [`Canvas::draw`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub texture: TextureId,
    pub position: Vector2,
    pub rotation: f32,
    pub scale: f32,
    pub tint: Tint,
}

/// Canvas that only remembers what it was asked to draw. Used headless and
/// in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, texture: TextureId, position: Vector2, rotation: f32, scale: f32, tint: Tint) {
        self.calls.push(DrawCall {
            texture,
            position,
            rotation,
            scale,
            tint,
        });
    }
}

/// Which half of the depth range a sprite pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRenderMode {
    /// `z >= 0`, in front of the tile layer.
    PositiveZ,
    /// `z < 0`, behind the tile layer.
    NegativeZ,
}

/// Draw the sprites of one depth pass that intersect `camera_box`.
/// Returns the number of sprites drawn.
pub fn render_sprites(
    world: &World,
    canvas: &mut impl Canvas,
    camera_box: &Rectangle,
    mode: SpriteRenderMode,
) -> usize {
    let order = world.resource::<RenderOrder>();
    let textures = world.resource::<TextureStore>();
    let pixels_to_unit = world
        .get_resource::<SimConfig>()
        .map_or_else(|| SimConfig::new().pixels_to_unit(), SimConfig::pixels_to_unit);

    let mut drawn = 0;

    for &(z, entity) in order.entries.iter() {
        // Negative is behind the tile layer, non-negative in front
        match mode {
            SpriteRenderMode::PositiveZ if z < 0.0 => continue,
            SpriteRenderMode::NegativeZ if !(z < 0.0) => break,
            _ => {}
        }

        let (Some(sprite), Some(transform)) =
            (world.get::<Sprite>(entity), world.get::<Transform>(entity))
        else {
            continue;
        };
        let Some(info) = textures.get(sprite.texture) else {
            trace!("Sprite {:?} has unknown texture {:?}", entity, sprite.texture);
            continue;
        };

        let position = transform.position + sprite.position.rotated(transform.rotation);
        let rotation = transform.rotation + sprite.rotation;
        let scale = transform.scale * sprite.scale;

        let extent = Rectangle::new(
            position.x,
            position.y,
            info.width as f32 * pixels_to_unit,
            info.height as f32 * pixels_to_unit,
        );
        let aabb = rotated_scaled_aabb(&extent, rotation, scale);

        if intersects(&aabb, camera_box) {
            canvas.draw(sprite.texture, position, rotation, extent.width * scale, sprite.tint);
            drawn += 1;
        }
    }

    drawn
}

/// Draw every non-empty tile overlapping `camera_box`. Returns the number of
/// tiles drawn.
pub fn render_tiles(
    map: &TileMap,
    tileset: &TileSet,
    canvas: &mut impl Canvas,
    camera_box: &Rectangle,
) -> usize {
    let x0 = (camera_box.x.floor() as i32).max(0);
    let y0 = (camera_box.y.floor() as i32).max(0);
    let x1 = (camera_box.right().ceil() as i32).min(map.width() as i32);
    let y1 = (camera_box.bottom().ceil() as i32).min(map.height() as i32);

    let mut drawn = 0;
    for ty in y0..y1 {
        for tx in x0..x1 {
            let id = map.get(tx, ty);
            if id == TileId::Empty {
                continue;
            }
            let Some(texture) = tileset.get(id) else {
                continue;
            };
            canvas.draw(
                texture,
                Vector2::new(tx as f32, ty as f32),
                0.0,
                1.0,
                Tint::WHITE,
            );
            drawn += 1;
        }
    }
    drawn
}

/// Offset from the agent position to the top-left of its sprite, so the feet
/// line up with the bottom of the collision hull.
pub const AGENT_SPRITE_ANCHOR: Vector2 = Vector2::new(-0.5, -1.0);

/// Draw the player with the skin of `theme`.
///
/// Only the standing pose is selected, and only while horizontal velocity is
/// exactly zero. A moving agent has no pose and is not drawn. Returns whether
/// a draw call was made.
pub fn render_agent(world: &mut World, canvas: &mut impl Canvas, theme: usize) -> bool {
    let mut query = world.query_filtered::<(&Transform, &Dynamics), With<Agent>>();
    let agents: Vec<(Transform, Dynamics)> = query.iter(world).map(|(t, d)| (*t, *d)).collect();
    assert_eq!(
        agents.len(),
        1,
        "agent renderer expects exactly one agent entity"
    );
    let (transform, dynamics) = agents[0];

    let Some(skin) = world.resource::<AgentSkins>().get(theme) else {
        return false;
    };

    let texture = if dynamics.velocity.x == 0.0 {
        Some(skin.stand)
    } else {
        None
    };

    let Some(texture) = texture else {
        trace!("No agent pose for velocity {:?}", dynamics.velocity);
        return false;
    };

    canvas.draw(
        texture,
        transform.position + AGENT_SPRITE_ANCHOR,
        0.0,
        1.0,
        Tint::WHITE,
    );
    true
}
