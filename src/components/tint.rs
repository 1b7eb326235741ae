//! Color tint for sprite draws.
//!
//! The [`Tint`] value is carried by every [`Sprite`](crate::components::sprite::Sprite)
//! and handed unchanged to the [`Canvas`](crate::systems::render::Canvas)
//! draw primitive.

use serde::{Deserialize, Serialize};

/// RGBA color modulation applied by the draw primitive.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::new(255, 255, 255, 255);

    /// Create a new Tint with the specified RGBA values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}
