//! raylib implementation of the [`Canvas`] draw primitive.
//!
//! World units are converted to pixels with `unit_to_pixels`. The caller owns
//! the loaded textures and the drawing scope.

use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::tint::Tint;
use crate::geometry::Vector2;
use crate::resources::texturestore::TextureId;
use crate::systems::render::Canvas;

pub struct RaylibCanvas<'a, D: RaylibDraw> {
    draw: &'a mut D,
    textures: &'a FxHashMap<TextureId, Texture2D>,
    unit_to_pixels: f32,
}

impl<'a, D: RaylibDraw> RaylibCanvas<'a, D> {
    pub fn new(
        draw: &'a mut D,
        textures: &'a FxHashMap<TextureId, Texture2D>,
        unit_to_pixels: f32,
    ) -> Self {
        Self {
            draw,
            textures,
            unit_to_pixels,
        }
    }
}

impl<D: RaylibDraw> Canvas for RaylibCanvas<'_, D> {
    fn draw(&mut self, texture: TextureId, position: Vector2, rotation: f32, scale: f32, tint: Tint) {
        let Some(tex) = self.textures.get(&texture) else {
            return;
        };
        let width = tex.width() as f32;
        if width <= 0.0 {
            return;
        }
        self.draw.draw_texture_ex(
            tex,
            ffi::Vector2 {
                x: position.x * self.unit_to_pixels,
                y: position.y * self.unit_to_pixels,
            },
            rotation.to_degrees(),
            scale * self.unit_to_pixels / width,
            Color::new(tint.r, tint.g, tint.b, tint.a),
        );
    }
}
