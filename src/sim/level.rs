//! Level layout
//!
//! A level is a fixed grid of blocks spanning the arena width. From level 2
//! onwards some blocks are randomly reinforced.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Block, BlockKind, GameState, Paddle};
use crate::consts::BLOCK_COLORS;

/// Reset paddle, ball and blocks for `state.level`
///
/// Score, lives and the session speed are left alone.
pub fn generate_level(state: &mut GameState) {
    let config = &state.config;
    let width = state.arena.width;
    let height = state.arena.height;

    state.paddle = Paddle {
        x: width / 2.0,
        y: height * (1.0 - config.paddle_y_offset),
        width: width * config.paddle_width_ratio,
        height: height * config.paddle_height_ratio,
    };

    state.ball = Ball::new(Vec2::ZERO, width * config.ball_radius_ratio);
    state.ball.rest_on(&state.paddle);

    let rows = config.block_rows;
    let cols = config.block_cols;
    let size = Vec2::new(width / cols as f32, height * config.block_height_ratio);
    let reinforced_chance = if state.level > 1 {
        config.reinforced_chance
    } else {
        0.0
    };

    state.blocks.clear();
    state.blocks.reserve((rows * cols) as usize);
    for row in 0..rows {
        let color = BLOCK_COLORS[row as usize % BLOCK_COLORS.len()];
        for col in 0..cols {
            let kind = if reinforced_chance > 0.0 && state.rng.random_bool(reinforced_chance) {
                BlockKind::Reinforced
            } else {
                BlockKind::Normal
            };
            let pos = Vec2::new(
                col as f32 * size.x,
                row as f32 * size.y + config.block_top_offset,
            );
            let id = row * cols + col;
            state.blocks.push(Block::new(id, pos, size, kind, color));
        }
    }

    let reinforced = state
        .blocks
        .iter()
        .filter(|b| b.kind == BlockKind::Reinforced)
        .count();
    log::info!(
        "Level {}: {} blocks ({} reinforced)",
        state.level,
        state.blocks.len(),
        reinforced
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn state_with(config: GameConfig) -> GameState {
        GameState::new(config, 800.0, 600.0).unwrap()
    }

    #[test]
    fn test_level_one_grid() {
        let state = state_with(GameConfig {
            seed: Some(1),
            ..Default::default()
        });

        assert_eq!(state.blocks.len(), 40);
        assert!(state.blocks.iter().all(|b| b.kind == BlockKind::Normal));

        // Row-major ids and positions
        let b = &state.blocks[9];
        assert_eq!(b.id, 9);
        assert!(b.pos.abs_diff_eq(Vec2::new(100.0, 18.0 + 80.0), 1e-3));
        assert!(b.size.abs_diff_eq(Vec2::new(100.0, 18.0), 1e-3));
        assert_eq!(b.color, BLOCK_COLORS[1]);

        // Row 4 wraps the palette back to red
        assert_eq!(state.blocks[32].color, BLOCK_COLORS[0]);
    }

    #[test]
    fn test_paddle_and_ball_layout() {
        let state = state_with(GameConfig {
            seed: Some(1),
            ..Default::default()
        });
        assert_eq!(state.paddle.x, 400.0);
        assert!((state.paddle.y - 540.0).abs() < 1e-3);
        assert!((state.paddle.width - 160.0).abs() < 1e-3);
        assert!((state.paddle.height - 12.0).abs() < 1e-4);
        assert!((state.ball.radius - 12.0).abs() < 1e-4);
        assert_eq!(state.ball.pos.x, 400.0);
        assert!((state.ball.pos.y - (540.0 - 12.0 - 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_later_levels_can_reinforce() {
        let mut state = state_with(GameConfig {
            seed: Some(3),
            reinforced_chance: 1.0,
            ..Default::default()
        });
        state.level = 2;
        generate_level(&mut state);
        assert!(state.blocks.iter().all(|b| b.kind == BlockKind::Reinforced));
        assert!(state.blocks.iter().all(|b| b.health == 2));
    }

    #[test]
    fn test_layout_is_deterministic_per_seed() {
        let config = GameConfig {
            seed: Some(99),
            ..Default::default()
        };
        let mut a = state_with(config.clone());
        let mut b = state_with(config);
        a.level = 3;
        b.level = 3;
        generate_level(&mut a);
        generate_level(&mut b);
        let kinds_a: Vec<_> = a.blocks.iter().map(|b| b.kind).collect();
        let kinds_b: Vec<_> = b.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
