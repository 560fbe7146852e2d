//! Game state and core simulation types
//!
//! Entities are plain data owned by [`GameState`]. Drawing never happens here;
//! renderers read a [`Snapshot`] instead.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::generate_level;
use crate::config::{ConfigError, GameConfig};
use crate::consts::SERVE_GAP;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for launch input
    Init,
    /// Active gameplay
    Playing,
    /// Every block cleared, waiting for input to advance
    LevelComplete,
    /// Out of lives
    GameOver,
    /// Final configured level cleared
    Victory,
}

/// Gameplay feedback for audio, HUD and shake, queued until drained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { speed: f32 },
    WallHit,
    PaddleHit { offset: f32 },
    BlockDamaged { id: u32 },
    BlockDestroyed { id: u32, points: u64, combo: u32 },
    LifeLost { lives_left: u8 },
    LevelComplete { level: u32 },
    GameOver { score: u64 },
    Victory { score: u64 },
}

/// Play area dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Conserved magnitude of `vel`; bounces change direction only
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            speed: 0.0,
        }
    }

    /// Single explicit Euler step
    #[inline]
    pub fn integrate(&mut self, time_scale: f32) {
        self.pos += self.vel * time_scale;
    }

    /// Point the ball along `angle` (radians, screen space) at its current speed
    pub fn set_heading(&mut self, angle: f32) {
        self.vel = Vec2::new(angle.cos(), angle.sin()) * self.speed;
    }

    /// Park the ball on top of the paddle with no velocity
    pub fn rest_on(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.x, paddle.y - self.radius - SERVE_GAP);
        self.vel = Vec2::ZERO;
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal center
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - self.half_width()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.half_width()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Direct assignment; clamping is the caller's job
    pub fn set_position_x(&mut self, x: f32) {
        self.x = x;
    }

    /// Clamp a candidate center so the paddle stays fully inside the arena
    pub fn clamp_x(&self, x: f32, arena_width: f32) -> f32 {
        let half = self.half_width();
        if arena_width <= self.width {
            return arena_width / 2.0;
        }
        x.clamp(half, arena_width - half)
    }
}

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Normal,
    /// Takes two hits
    Reinforced,
}

impl BlockKind {
    pub fn initial_health(self) -> u8 {
        match self {
            BlockKind::Normal => 1,
            BlockKind::Reinforced => 2,
        }
    }
}

/// A destructible block (axis-aligned rectangle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Row-major index within the level grid
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: BlockKind,
    pub health: u8,
    pub active: bool,
    /// 0xRRGGBB
    pub color: u32,
}

impl Block {
    pub fn new(id: u32, pos: Vec2, size: Vec2, kind: BlockKind, color: u32) -> Self {
        Self {
            id,
            pos,
            size,
            kind,
            health: kind.initial_health(),
            active: true,
            color,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Apply one hit. Returns true when this hit destroyed the block.
    ///
    /// Callers must skip inactive blocks.
    pub fn hit(&mut self) -> bool {
        debug_assert!(self.active, "hit() on inactive block {}", self.id);
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// A cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in baseline frames
    pub life: f32,
    pub color: u32,
}

impl Particle {
    pub fn update(&mut self, time_scale: f32) {
        self.pos += self.vel * time_scale;
        self.life -= time_scale;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Per-session tuning that evolves as levels are cleared
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Launch speed as a fraction of arena height per baseline frame
    pub base_speed_ratio: f32,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            base_speed_ratio: config.ball_speed_ratio,
        }
    }

    /// Compound the launch speed for the next level
    pub fn advance_level(&mut self, multiplier: f32) {
        self.base_speed_ratio *= multiplier;
    }

    pub fn launch_speed(&self, arena: &Arena) -> f32 {
        arena.height * self.base_speed_ratio
    }
}

/// Read-only view handed to render sinks once per frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub arena: Arena,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub combo: u32,
    pub shake: f32,
    pub frames: u64,
    pub paddle: &'a Paddle,
    pub ball: &'a Ball,
    pub blocks: &'a [Block],
    pub particles: &'a [Particle],
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub session: Session,
    pub arena: Arena,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// 1-based level number
    pub level: u32,
    /// Consecutive destroys since the last paddle bounce
    pub combo: u32,
    /// Remaining screen shake in baseline frames
    pub shake: f32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Row-major grid order; scan order for collisions
    pub blocks: Vec<Block>,
    pub particles: Vec<Particle>,
    /// Events raised since the last [`GameState::drain_events`]
    pub events: Vec<GameEvent>,
    /// Frames simulated since the session started
    pub frames: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session for an arena of the given size and lay out level 1
    pub fn new(config: GameConfig, width: f32, height: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::Arena { width, height });
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("New session {}x{} (seed {})", width, height, seed);

        let mut state = Self {
            session: Session::new(&config),
            arena: Arena { width, height },
            phase: GamePhase::Init,
            score: 0,
            lives: config.starting_lives,
            level: 1,
            combo: 0,
            shake: 0.0,
            paddle: Paddle {
                x: width / 2.0,
                y: height,
                width: 0.0,
                height: 0.0,
            },
            ball: Ball::new(Vec2::ZERO, 0.0),
            blocks: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        generate_level(&mut state);

        Ok(state)
    }

    /// Number of blocks still standing
    pub fn active_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.active).count()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            arena: self.arena,
            score: self.score,
            lives: self.lives,
            level: self.level,
            combo: self.combo,
            shake: self.shake,
            frames: self.frames,
            paddle: &self.paddle,
            ball: &self.ball,
            blocks: &self.blocks,
            particles: &self.particles,
        }
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
