//! Player agent component and the discrete action decoding.
//!
//! The external controller writes an action code in `0..=8` into
//! [`Agent::action`] before each step. The code is not a named enum: it is
//! decoded into three independent effects by [`ActionEffects::decode`].
//!
//! | code | movement_x | jump | fallthrough |
//! |------|------------|------|-------------|
//! | 0    | +1         | no   | yes         |
//! | 1    | +1         | no   | no          |
//! | 2    | +1         | yes  | no          |
//! | 3    | 0          | no   | yes         |
//! | 4    | 0          | no   | no          |
//! | 5    | 0          | yes  | no          |
//! | 6    | -1         | no   | yes         |
//! | 7    | -1         | no   | no          |
//! | 8    | 0          | yes  | no          |

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Number of distinct action codes.
pub const ACTION_COUNT: u8 = 9;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub action: u8,
    pub on_ground: bool,
}

impl Agent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> ActionEffects {
        ActionEffects::decode(self.action)
    }
}

/// The three effects an action code drives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionEffects {
    pub movement_x: f32,
    pub jump: bool,
    pub fallthrough: bool,
}

impl ActionEffects {
    /// Codes outside `0..=8` decode to "do nothing".
    pub fn decode(action: u8) -> Self {
        let right = matches!(action, 0 | 1 | 2);
        let left = matches!(action, 6 | 7);
        Self {
            movement_x: (right as i8 - left as i8) as f32,
            jump: matches!(action, 2 | 5 | 8),
            fallthrough: matches!(action, 0 | 3 | 6),
        }
    }
}
