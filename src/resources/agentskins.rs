//! Player textures per color theme.
//!
//! Five themes, four poses each, at 128×256 pixels. Only the standing pose is
//! selected by the agent renderer today; the others are registered so a pose
//! selector can use them without touching asset setup.

use bevy_ecs::prelude::Resource;

use crate::resources::texturestore::{TextureId, TextureStore};

pub const AGENT_THEMES: [&str; 5] = ["Beige", "Blue", "Green", "Pink", "Yellow"];

const AGENT_TEXTURE_WIDTH: u32 = 128;
const AGENT_TEXTURE_HEIGHT: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPose {
    Stand,
    Jump,
    Walk1,
    Walk2,
}

impl AgentPose {
    pub const ALL: [AgentPose; 4] = [
        AgentPose::Stand,
        AgentPose::Jump,
        AgentPose::Walk1,
        AgentPose::Walk2,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            AgentPose::Stand => "stand",
            AgentPose::Jump => "jump",
            AgentPose::Walk1 => "walk1",
            AgentPose::Walk2 => "walk2",
        }
    }
}

/// Asset path of one pose of one theme.
pub fn agent_texture_path(theme: &str, pose: AgentPose) -> String {
    format!(
        "assets/kenney/Players/128x256/{theme}/alien{theme}_{}.png",
        pose.suffix()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSkin {
    pub stand: TextureId,
    pub jump: TextureId,
    pub walk1: TextureId,
    pub walk2: TextureId,
}

/// One [`AgentSkin`] per entry of [`AGENT_THEMES`], in the same order.
#[derive(Resource, Debug, Clone)]
pub struct AgentSkins {
    pub skins: Vec<AgentSkin>,
}

impl AgentSkins {
    pub fn register(store: &mut TextureStore) -> Self {
        let skins = AGENT_THEMES
            .iter()
            .map(|theme| {
                let mut load = |pose| {
                    store.register(
                        agent_texture_path(theme, pose),
                        AGENT_TEXTURE_WIDTH,
                        AGENT_TEXTURE_HEIGHT,
                    )
                };
                AgentSkin {
                    stand: load(AgentPose::Stand),
                    jump: load(AgentPose::Jump),
                    walk1: load(AgentPose::Walk1),
                    walk2: load(AgentPose::Walk2),
                }
            })
            .collect();
        Self { skins }
    }

    /// Skin for `theme`; indices wrap around the theme list.
    pub fn get(&self, theme: usize) -> Option<&AgentSkin> {
        if self.skins.is_empty() {
            return None;
        }
        self.skins.get(theme % self.skins.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_path_layout() {
        assert_eq!(
            agent_texture_path("Blue", AgentPose::Walk2),
            "assets/kenney/Players/128x256/Blue/alienBlue_walk2.png"
        );
    }

    #[test]
    fn test_register_all_themes_and_poses() {
        let mut store = TextureStore::new();
        let skins = AgentSkins::register(&mut store);
        assert_eq!(skins.skins.len(), AGENT_THEMES.len());
        assert_eq!(store.len(), AGENT_THEMES.len() * AgentPose::ALL.len());
        let pink = skins.get(3).unwrap();
        assert_eq!(
            store.lookup(agent_texture_path("Pink", AgentPose::Stand)),
            Some(pink.stand)
        );
        assert_eq!(store.get(pink.jump).unwrap().height, 256);
    }

    #[test]
    fn test_get_wraps_theme_index() {
        let mut store = TextureStore::new();
        let skins = AgentSkins::register(&mut store);
        assert_eq!(skins.get(0), skins.get(AGENT_THEMES.len()));
    }
}
