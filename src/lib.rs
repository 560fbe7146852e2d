//! Block Breaker - a paddle, a ball and a wall of blocks
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, game state machine)
//! - `config`: Data-driven game balance and validation
//! - `renderer`: Render sink interface and a vertex mesh implementation

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use renderer::{MeshSink, RenderSink};

/// Game configuration constants
pub mod consts {
    /// Frame duration the motion constants are tuned for (60 fps)
    pub const BASELINE_FRAME_MS: f32 = 16.667;
    /// Longest frame the simulation will integrate in one step
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Gap between the resting ball and the paddle top
    pub const SERVE_GAP: f32 = 2.0;

    /// Block row colors, top to bottom (red, orange, yellow, green)
    pub const BLOCK_COLORS: [u32; 4] = [0xEF4444, 0xF97316, 0xEAB308, 0x22C55E];
    pub const PADDLE_COLOR: u32 = 0x38BDF8;
    pub const BALL_COLOR: u32 = 0xFFFFFF;
    pub const BACKGROUND_COLOR: u32 = 0x0F172A;
}

/// Convert a 0xRRGGBB color into normalized RGBA
#[inline]
pub fn rgb_to_rgba(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    [r, g, b, alpha]
}

/// Frame-rate independent multiplier relative to the 60 fps baseline
#[inline]
pub fn time_scale(elapsed_ms: f32) -> f32 {
    elapsed_ms.clamp(0.0, consts::MAX_FRAME_MS) / consts::BASELINE_FRAME_MS
}
