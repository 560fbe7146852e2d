//! Simulation module
//!
//! All gameplay logic lives here:
//! - Frame-rate independent timestep (scaled against 60 fps)
//! - Seeded RNG only
//! - Stable iteration order (row-major block grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod machine;
pub mod state;
pub mod tick;

pub use collision::{
    BlockHit, WallHit, block_collision, paddle_collision, resolve_block_bounce,
    resolve_paddle_bounce, wall_collision,
};
pub use level::generate_level;
pub use state::{
    Arena, Ball, Block, BlockKind, GameEvent, GamePhase, GameState, Paddle, Particle, Session,
    Snapshot,
};
pub use tick::{TickInput, block_points, tick, update};
