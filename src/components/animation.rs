//! Flip-book animation component.
//!
//! An [`Animation`] cycles its sprite through a fixed list of textures at a
//! constant frame duration. It only has an effect on entities that also carry
//! a [`Sprite`](crate::components::sprite::Sprite); the animation system
//! advances it and writes the current frame into the sprite.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::resources::texturestore::TextureId;

/// Per-entity playback state.
///
/// Invariants, kept by [`Animation::new`] and [`Animation::advance`]:
/// - `frames` is non-empty and `frame_index < frames.len()`
/// - `rate` is finite and positive
/// - `0 <= t < rate` after every advance
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct Animation {
    frames: Vec<TextureId>,
    rate: f32,
    t: f32,
    frame_index: usize,
}

impl Animation {
    /// Build an animation from its frames and the duration of one frame in
    /// seconds. Rejects data the frame-advance loop cannot handle.
    pub fn new(frames: Vec<TextureId>, rate: f32) -> Result<Self, String> {
        if frames.is_empty() {
            return Err("Animation needs at least one frame".to_string());
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(format!(
                "Animation frame rate must be a positive number of seconds, got {}",
                rate
            ));
        }
        Ok(Self {
            frames,
            rate,
            t: 0.0,
            frame_index: 0,
        })
    }

    /// Accumulate `dt` seconds and step over every frame boundary crossed.
    /// Returns the texture of the frame now showing. A non-finite `dt` leaves
    /// the animation where it is.
    pub fn advance(&mut self, dt: f32) -> TextureId {
        if !dt.is_finite() {
            return self.current();
        }
        let t = self.t + dt;
        if t >= self.rate {
            let remainder = t.rem_euclid(self.rate);
            let crossed = ((t - remainder) / self.rate).round() as u64;
            let len = self.frames.len() as u64;
            self.frame_index = ((self.frame_index as u64 + crossed % len) % len) as usize;
            self.t = remainder;
        } else {
            self.t = t.max(0.0);
        }
        self.current()
    }

    pub fn current(&self) -> TextureId {
        self.frames[self.frame_index]
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn elapsed(&self) -> f32 {
        self.t
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
