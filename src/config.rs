//! Game balance configuration
//!
//! Every size is a ratio of the arena so the layout survives any window size.
//! Loaded from JSON; missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("invalid arena size {width}x{height}")]
    Arena { width: f32, height: f32 },
}

/// Game balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Paddle ===
    /// Paddle width as a fraction of arena width
    pub paddle_width_ratio: f32,
    /// Paddle height as a fraction of arena height
    pub paddle_height_ratio: f32,
    /// Distance of the paddle top from the bottom, as a fraction of arena height
    pub paddle_y_offset: f32,
    /// Maximum deflection from straight up at the paddle edge (radians)
    pub max_bounce_angle: f32,

    // === Ball ===
    /// Ball radius as a fraction of arena width
    pub ball_radius_ratio: f32,
    /// Launch speed per frame as a fraction of arena height
    pub ball_speed_ratio: f32,
    /// Launch speed multiplier applied on each level advance
    pub level_speed_multiplier: f32,
    /// Total launch angle spread around straight up (radians)
    pub launch_spread: f32,

    // === Blocks ===
    pub block_rows: u32,
    pub block_cols: u32,
    /// Block height as a fraction of arena height
    pub block_height_ratio: f32,
    /// Gap above the first block row (pixels, leaves room for the HUD)
    pub block_top_offset: f32,
    /// Chance of a reinforced block from level 2 onwards
    pub reinforced_chance: f64,

    // === Scoring ===
    pub points_normal: u64,
    pub points_reinforced: u64,
    /// Bonus per combo step beyond the first destroy
    pub combo_step_bonus: u64,

    // === Session ===
    pub starting_lives: u8,
    /// Clearing this level ends the run in victory (None = endless)
    pub final_level: Option<u32>,
    /// Fixed RNG seed (None = seeded from the clock)
    pub seed: Option<u64>,

    // === Effects ===
    pub particle_burst: u32,
    /// Particle lifetime in baseline frames
    pub particle_life: f32,
    /// Particle velocity spread per axis (velocities fall in +-spread/2)
    pub particle_speed: f32,
    pub max_particles: usize,
    /// Screen shake duration in baseline frames
    pub shake_frames: f32,

    // === Autopilot ===
    /// Maximum paddle travel per baseline frame when playing itself
    pub autopilot_max_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            paddle_width_ratio: 0.2,
            paddle_height_ratio: 0.02,
            paddle_y_offset: 0.1,
            max_bounce_angle: std::f32::consts::FRAC_PI_3,

            ball_radius_ratio: 0.015,
            ball_speed_ratio: 0.005,
            level_speed_multiplier: 1.1,
            launch_spread: 1.0,

            block_rows: 5,
            block_cols: 8,
            block_height_ratio: 0.03,
            block_top_offset: 80.0,
            reinforced_chance: 0.2,

            points_normal: 100,
            points_reinforced: 250,
            combo_step_bonus: 50,

            starting_lives: 3,
            final_level: None,
            seed: None,

            particle_burst: 10,
            particle_life: 30.0,
            particle_speed: 5.0,
            max_particles: 256,
            shake_frames: 5.0,

            autopilot_max_step: 12.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("paddle_width_ratio", self.paddle_width_ratio)?;
        positive("paddle_height_ratio", self.paddle_height_ratio)?;
        positive("ball_radius_ratio", self.ball_radius_ratio)?;
        positive("ball_speed_ratio", self.ball_speed_ratio)?;
        positive("level_speed_multiplier", self.level_speed_multiplier)?;
        positive("block_height_ratio", self.block_height_ratio)?;
        positive("particle_life", self.particle_life)?;

        if self.paddle_width_ratio > 1.0 {
            return Err(ConfigError::Invalid {
                field: "paddle_width_ratio",
                reason: "paddle must fit inside the arena",
            });
        }
        if !(0.0..1.0).contains(&self.paddle_y_offset) {
            return Err(ConfigError::Invalid {
                field: "paddle_y_offset",
                reason: "must be in [0, 1)",
            });
        }
        if !(0.0..std::f32::consts::FRAC_PI_2).contains(&self.max_bounce_angle) {
            return Err(ConfigError::Invalid {
                field: "max_bounce_angle",
                reason: "must be in [0, pi/2)",
            });
        }
        if !(0.0..std::f32::consts::PI).contains(&self.launch_spread) {
            return Err(ConfigError::Invalid {
                field: "launch_spread",
                reason: "must be in [0, pi)",
            });
        }
        if self.block_rows == 0 || self.block_cols == 0 {
            return Err(ConfigError::Invalid {
                field: "block_rows/block_cols",
                reason: "grid needs at least one block",
            });
        }
        if !(0.0..=1.0).contains(&self.reinforced_chance) {
            return Err(ConfigError::Invalid {
                field: "reinforced_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        if self.final_level == Some(0) {
            return Err(ConfigError::Invalid {
                field: "final_level",
                reason: "levels start at 1",
            });
        }
        Ok(())
    }
}
