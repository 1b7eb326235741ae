//! Simulation configuration resource.
//!
//! Settings are loaded from an INI file. Every key is optional; missing keys
//! keep the defaults below, which reproduce the stock game.
//!
//! # Configuration File Format
//!
//! ```ini
//! [sim]
//! timestep = 0.0166667
//! unit_to_pixels = 64
//! seed = 0
//!
//! [agent]
//! max_jump = 1.5
//! gravity = 0.2
//! max_speed = 0.5
//! mix = 0.2
//! air_control = 0.15
//!
//! [mob]
//! speed = 0.3
//! frame_rate = 0.2
//!
//! [camera]
//! view_width = 16
//! view_height = 9
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;
const DEFAULT_UNIT_TO_PIXELS: f32 = 64.0;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_MAX_JUMP: f32 = 1.5;
const DEFAULT_GRAVITY: f32 = 0.2;
const DEFAULT_MAX_SPEED: f32 = 0.5;
const DEFAULT_MIX: f32 = 0.2;
const DEFAULT_AIR_CONTROL: f32 = 0.15;
const DEFAULT_MOB_SPEED: f32 = 0.3;
const DEFAULT_MOB_FRAME_RATE: f32 = 0.2;
const DEFAULT_VIEW_WIDTH: f32 = 16.0;
const DEFAULT_VIEW_HEIGHT: f32 = 9.0;
const DEFAULT_CONFIG_PATH: &str = "./tilerun.ini";

/// Fixed tunables of the player controller.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AgentTuning {
    /// Jump impulse, also the cap on vertical speed.
    pub max_jump: f32,
    pub gravity: f32,
    pub max_speed: f32,
    /// Horizontal blend factor on the ground.
    pub mix: f32,
    /// Multiplier on `mix` while airborne.
    pub air_control: f32,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            max_jump: DEFAULT_MAX_JUMP,
            gravity: DEFAULT_GRAVITY,
            max_speed: DEFAULT_MAX_SPEED,
            mix: DEFAULT_MIX,
            air_control: DEFAULT_AIR_CONTROL,
        }
    }
}

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Length of one simulation step in seconds.
    pub timestep: f32,
    /// Pixels per world unit for the draw backend.
    pub unit_to_pixels: f32,
    /// Seed for random action rollouts.
    pub seed: u64,
    pub agent: AgentTuning,
    /// Initial patrol speed of spawned mobs (world units per second).
    pub mob_speed: f32,
    /// Seconds per mob animation frame.
    pub mob_frame_rate: f32,
    /// Visible world area in units, used for culling.
    pub view_width: f32,
    pub view_height: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            unit_to_pixels: DEFAULT_UNIT_TO_PIXELS,
            seed: DEFAULT_SEED,
            agent: AgentTuning::default(),
            mob_speed: DEFAULT_MOB_SPEED,
            mob_frame_rate: DEFAULT_MOB_FRAME_RATE,
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    pub fn pixels_to_unit(&self) -> f32 {
        1.0 / self.unit_to_pixels
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&ini)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), String> {
        let float = |section: &str, key: &str| -> Result<Option<f32>, String> {
            ini.getfloat(section, key)
                .map(|v| v.map(|v| v as f32))
                .map_err(|e| format!("[{}] {}: {}", section, key, e))
        };

        // [sim] section
        if let Some(v) = float("sim", "timestep")? {
            self.timestep = v;
        }
        if let Some(v) = float("sim", "unit_to_pixels")? {
            self.unit_to_pixels = v;
        }
        if let Some(v) = ini
            .getuint("sim", "seed")
            .map_err(|e| format!("[sim] seed: {}", e))?
        {
            self.seed = v;
        }

        // [agent] section
        if let Some(v) = float("agent", "max_jump")? {
            self.agent.max_jump = v;
        }
        if let Some(v) = float("agent", "gravity")? {
            self.agent.gravity = v;
        }
        if let Some(v) = float("agent", "max_speed")? {
            self.agent.max_speed = v;
        }
        if let Some(v) = float("agent", "mix")? {
            self.agent.mix = v;
        }
        if let Some(v) = float("agent", "air_control")? {
            self.agent.air_control = v;
        }

        // [mob] section
        if let Some(v) = float("mob", "speed")? {
            self.mob_speed = v;
        }
        if let Some(v) = float("mob", "frame_rate")? {
            self.mob_frame_rate = v;
        }

        // [camera] section
        if let Some(v) = float("camera", "view_width")? {
            self.view_width = v;
        }
        if let Some(v) = float("camera", "view_height")? {
            self.view_height = v;
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(format!("timestep must be positive, got {}", self.timestep));
        }
        if !(self.unit_to_pixels.is_finite() && self.unit_to_pixels > 0.0) {
            return Err(format!(
                "unit_to_pixels must be positive, got {}",
                self.unit_to_pixels
            ));
        }
        if !(self.mob_frame_rate.is_finite() && self.mob_frame_rate > 0.0) {
            return Err(format!(
                "mob frame_rate must be positive, got {}",
                self.mob_frame_rate
            ));
        }
        if self.agent.max_jump < 0.0 {
            return Err(format!(
                "agent max_jump must not be negative, got {}",
                self.agent.max_jump
            ));
        }
        Ok(())
    }

    /// Save configuration to the INI file at `config_path`.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut ini = Ini::new();

        ini.set("sim", "timestep", Some(self.timestep.to_string()));
        ini.set("sim", "unit_to_pixels", Some(self.unit_to_pixels.to_string()));
        ini.set("sim", "seed", Some(self.seed.to_string()));

        ini.set("agent", "max_jump", Some(self.agent.max_jump.to_string()));
        ini.set("agent", "gravity", Some(self.agent.gravity.to_string()));
        ini.set("agent", "max_speed", Some(self.agent.max_speed.to_string()));
        ini.set("agent", "mix", Some(self.agent.mix.to_string()));
        ini.set("agent", "air_control", Some(self.agent.air_control.to_string()));

        ini.set("mob", "speed", Some(self.mob_speed.to_string()));
        ini.set("mob", "frame_rate", Some(self.mob_frame_rate.to_string()));

        ini.set("camera", "view_width", Some(self.view_width.to_string()));
        ini.set("camera", "view_height", Some(self.view_height.to_string()));

        ini.write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
