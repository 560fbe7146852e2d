//! Per-frame simulation step
//!
//! The driver calls [`update`] (or [`tick`] with input) once per display
//! refresh. Motion is scaled against a 60 fps baseline so gameplay speed does
//! not depend on the refresh rate.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    block_collision, paddle_collision, resolve_block_bounce, resolve_paddle_bounce, wall_collision,
};
use super::state::{BlockKind, GameEvent, GamePhase, GameState, Particle};
use crate::config::GameConfig;
use crate::time_scale;

/// Input resolved by the platform layer for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal paddle movement since the last frame (pixels)
    pub paddle_delta: f32,
    /// Launch / next level / restart (click, tap, space)
    pub primary_action: bool,
    /// Idle/demo mode - the game plays itself
    pub autopilot: bool,
}

/// Apply one frame of input, then advance the simulation
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input, time_scale(elapsed_ms));
    }

    if input.paddle_delta != 0.0 {
        state.move_paddle(input.paddle_delta);
    }
    if input.primary_action {
        state.on_primary_action();
    }

    update(state, elapsed_ms);
}

/// Advance the simulation by `elapsed_ms` of wall-clock time
pub fn update(state: &mut GameState, elapsed_ms: f32) {
    let dt = time_scale(elapsed_ms);
    state.frames += 1;

    // Cosmetics run in every phase
    for particle in &mut state.particles {
        particle.update(dt);
    }
    state.particles.retain(Particle::is_alive);
    state.shake = (state.shake - dt).max(0.0);

    if state.phase != GamePhase::Playing {
        return;
    }

    // --- INTEGRATE ---
    state.ball.integrate(dt);
    let finite = state.ball.is_finite();
    if !finite {
        log::error!("Ball state is not finite: {:?}", state.ball);
    }
    assert!(finite, "ball position or velocity became non-finite");

    // --- WALLS ---
    let wall = wall_collision(&mut state.ball, state.arena.width, state.arena.height);
    if wall.hit_side {
        state.shake = state.config.shake_frames;
        state.events.push(GameEvent::WallHit);
    }
    if wall.crossed_bottom {
        state.lose_life();
        return;
    }

    // --- PADDLE ---
    if paddle_collision(&state.ball, &state.paddle) {
        state.shake = state.config.shake_frames;
        state.combo = 0;
        let offset =
            resolve_paddle_bounce(&mut state.ball, &state.paddle, state.config.max_bounce_angle);
        state.events.push(GameEvent::PaddleHit { offset });
    }

    // --- BLOCKS ---
    // Row-major scan, first contact wins
    let hit = state
        .blocks
        .iter()
        .position(|block| block.active && block_collision(&state.ball, block).collided);
    if let Some(index) = hit {
        hit_block(state, index);
    }
}

/// Points for destroying a block at the given (already incremented) combo
pub fn block_points(config: &GameConfig, kind: BlockKind, combo: u32) -> u64 {
    let base = match kind {
        BlockKind::Normal => config.points_normal,
        BlockKind::Reinforced => config.points_reinforced,
    };
    let bonus = if combo > 1 {
        config.combo_step_bonus * u64::from(combo - 1)
    } else {
        0
    };
    base + bonus
}

fn hit_block(state: &mut GameState, index: usize) {
    let destroyed = state.blocks[index].hit();
    let block = &state.blocks[index];
    let (id, kind, center, color) = (block.id, block.kind, block.center(), block.color);

    if destroyed {
        state.combo += 1;
        let points = block_points(&state.config, kind, state.combo);
        state.score += points;
        log::debug!(
            "Block {} destroyed: +{} (combo {}, score {})",
            id,
            points,
            state.combo,
            state.score
        );
        state.events.push(GameEvent::BlockDestroyed {
            id,
            points,
            combo: state.combo,
        });
        spawn_burst(state, center, color);
    } else {
        state.combo = 0;
        state.shake = state.config.shake_frames;
        state.events.push(GameEvent::BlockDamaged { id });
    }

    resolve_block_bounce(&mut state.ball, &state.blocks[index]);

    if destroyed && state.active_blocks() == 0 {
        state.complete_level();
    }
}

/// Cosmetic debris where a block used to be
fn spawn_burst(state: &mut GameState, center: Vec2, color: u32) {
    let spread = state.config.particle_speed;
    let room = state
        .config
        .max_particles
        .saturating_sub(state.particles.len());
    let count = (state.config.particle_burst as usize).min(room);

    for _ in 0..count {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * spread,
            (state.rng.random::<f32>() - 0.5) * spread,
        );
        state.particles.push(Particle {
            pos: center,
            vel,
            life: state.config.particle_life,
            color,
        });
    }
}

/// Demo mode: chase the ball and press the button whenever the game waits
fn autopilot(state: &GameState, input: &mut TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        input.primary_action = true;
    }

    // Aim slightly off center, drifting over time, to avoid vertical loops
    let drift = (state.frames as f32 * 0.01).sin() * 0.5;
    let target = state.ball.pos.x + drift * state.paddle.half_width();
    let max_step = state.config.autopilot_max_step * dt;
    input.paddle_delta = (target - state.paddle.x).clamp(-max_step, max_step);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BASELINE_FRAME_MS;
    use crate::sim::state::Block;

    fn state() -> GameState {
        let config = GameConfig {
            seed: Some(12345),
            ..Default::default()
        };
        GameState::new(config, 800.0, 600.0).unwrap()
    }

    fn block_at(id: u32, x: f32, y: f32, kind: BlockKind) -> Block {
        Block::new(id, Vec2::new(x, y), Vec2::new(100.0, 20.0), kind, 0xEF4444)
    }

    /// Put a moving ball just under a block's bottom face
    fn aim_below(state: &mut GameState, block_x: f32, block_y: f32) {
        state.ball.pos = Vec2::new(block_x + 50.0, block_y + 28.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        state.ball.speed = 3.0;
        state.phase = GamePhase::Playing;
    }

    #[test]
    fn test_tick_init_to_playing() {
        let mut state = state();
        tick(&mut state, &TickInput::default(), BASELINE_FRAME_MS);
        assert_eq!(state.phase, GamePhase::Init);

        let input = TickInput {
            primary_action: true,
            ..Default::default()
        };
        tick(&mut state, &input, BASELINE_FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_ball_integrates_with_time_scale() {
        let mut state = state();
        state.blocks.clear();
        state.ball.pos = Vec2::new(400.0, 300.0);
        state.ball.vel = Vec2::new(2.0, -1.0);
        state.phase = GamePhase::Playing;

        update(&mut state, BASELINE_FRAME_MS * 2.0);
        assert!(state.ball.pos.abs_diff_eq(Vec2::new(404.0, 298.0), 1e-3));
    }

    #[test]
    fn test_ball_frozen_outside_playing() {
        let mut state = state();
        state.ball.vel = Vec2::new(2.0, -1.0);
        let pos = state.ball.pos;
        update(&mut state, BASELINE_FRAME_MS);
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_combo_scoring() {
        let mut state = state();
        state.blocks = vec![
            block_at(0, 100.0, 100.0, BlockKind::Normal),
            block_at(1, 300.0, 100.0, BlockKind::Normal),
            block_at(2, 500.0, 100.0, BlockKind::Normal),
            block_at(3, 650.0, 300.0, BlockKind::Normal),
        ];

        for x in [100.0, 300.0, 500.0] {
            aim_below(&mut state, x, 100.0);
            update(&mut state, 0.0);
        }

        assert_eq!(state.score, 100 + 150 + 200);
        assert_eq!(state.combo, 3);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_reinforced_points_with_combo() {
        let config = GameConfig::default();
        assert_eq!(block_points(&config, BlockKind::Reinforced, 1), 250);
        assert_eq!(block_points(&config, BlockKind::Reinforced, 3), 350);
        assert_eq!(block_points(&config, BlockKind::Normal, 1), 100);
    }

    #[test]
    fn test_paddle_bounce_resets_combo() {
        let mut state = state();
        state.combo = 3;
        state.ball.pos = Vec2::new(400.0, 550.0);
        state.ball.vel = Vec2::new(0.0, 3.0);
        state.ball.speed = 3.0;
        state.phase = GamePhase::Playing;

        update(&mut state, 0.0);
        assert_eq!(state.combo, 0);
        assert!(state.ball.vel.x.abs() < 1e-6);
        assert!((state.ball.vel.y + 3.0).abs() < 1e-6);
        assert!(state.events.contains(&GameEvent::PaddleHit { offset: 0.0 }));
        assert_eq!(state.shake, state.config.shake_frames);
    }

    #[test]
    fn test_damaging_hit_resets_combo() {
        let mut state = state();
        state.blocks = vec![
            block_at(0, 100.0, 100.0, BlockKind::Reinforced),
            block_at(1, 500.0, 100.0, BlockKind::Normal),
        ];
        state.combo = 2;
        aim_below(&mut state, 100.0, 100.0);

        update(&mut state, 0.0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.blocks[0].health, 1);
        assert!(state.blocks[0].active);
        assert!(state.ball.vel.y > 0.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_only_first_block_hit_per_frame() {
        let mut state = state();
        state.blocks = vec![
            block_at(0, 100.0, 100.0, BlockKind::Normal),
            block_at(1, 100.0, 120.0, BlockKind::Normal),
            block_at(2, 500.0, 300.0, BlockKind::Normal),
        ];
        state.ball.pos = Vec2::new(150.0, 120.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        state.ball.speed = 3.0;
        state.phase = GamePhase::Playing;

        update(&mut state, 0.0);
        assert!(!state.blocks[0].active);
        assert!(state.blocks[1].active);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_last_block_completes_level_same_frame() {
        let mut state = state();
        let mut cleared = block_at(0, 100.0, 100.0, BlockKind::Normal);
        cleared.active = false;
        cleared.health = 0;
        state.blocks = vec![cleared, block_at(1, 300.0, 100.0, BlockKind::Normal)];
        aim_below(&mut state, 300.0, 100.0);

        update(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.score, 100);
        assert!(state.events.contains(&GameEvent::LevelComplete { level: 1 }));

        // Ball stays put until the player advances
        let pos = state.ball.pos;
        update(&mut state, BASELINE_FRAME_MS);
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_ball_out_of_bottom_loses_life() {
        let mut state = state();
        state.ball.pos = Vec2::new(400.0, 610.0);
        state.ball.vel = Vec2::new(0.0, 3.0);
        state.ball.speed = 3.0;
        state.phase = GamePhase::Playing;

        update(&mut state, BASELINE_FRAME_MS);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Init);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.pos.x, state.paddle.x);
        assert!(state.events.contains(&GameEvent::LifeLost { lives_left: 2 }));
    }

    #[test]
    fn test_last_life_game_over() {
        let mut state = state();
        state.lives = 1;
        state.ball.pos = Vec2::new(400.0, 610.0);
        state.ball.vel = Vec2::new(0.0, 3.0);
        state.phase = GamePhase::Playing;

        update(&mut state, BASELINE_FRAME_MS);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_wall_hit_shakes_and_decays() {
        let mut state = state();
        state.ball.pos = Vec2::new(5.0, 300.0);
        state.ball.vel = Vec2::new(-3.0, 0.0);
        state.phase = GamePhase::Playing;

        update(&mut state, 0.0);
        assert_eq!(state.shake, 5.0);
        assert!(state.events.contains(&GameEvent::WallHit));

        state.phase = GamePhase::Init;
        update(&mut state, BASELINE_FRAME_MS);
        assert!((state.shake - 4.0).abs() < 1e-4);
        for _ in 0..10 {
            update(&mut state, BASELINE_FRAME_MS);
        }
        assert_eq!(state.shake, 0.0);
    }

    #[test]
    fn test_destroy_spawns_particles_that_expire() {
        let mut state = state();
        state.blocks = vec![
            block_at(0, 100.0, 100.0, BlockKind::Normal),
            block_at(1, 500.0, 100.0, BlockKind::Normal),
        ];
        aim_below(&mut state, 100.0, 100.0);
        update(&mut state, 0.0);

        assert_eq!(state.particles.len(), 10);
        assert!(state
            .particles
            .iter()
            .all(|p| p.pos == Vec2::new(150.0, 110.0) && p.color == 0xEF4444));
        assert!(state
            .particles
            .iter()
            .all(|p| p.vel.x.abs() <= 2.5 && p.vel.y.abs() <= 2.5));

        state.phase = GamePhase::Init;
        for _ in 0..31 {
            update(&mut state, BASELINE_FRAME_MS);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let config = GameConfig {
            seed: Some(1),
            max_particles: 4,
            ..Default::default()
        };
        let mut state = GameState::new(config, 800.0, 600.0).unwrap();
        state.blocks = vec![
            block_at(0, 100.0, 100.0, BlockKind::Normal),
            block_at(1, 500.0, 100.0, BlockKind::Normal),
        ];
        aim_below(&mut state, 100.0, 100.0);
        update(&mut state, 0.0);
        assert_eq!(state.particles.len(), 4);
    }

    #[test]
    #[should_panic(expected = "non-finite")]
    fn test_nan_ball_is_fatal() {
        let mut state = state();
        state.ball.vel = Vec2::new(f32::NAN, 1.0);
        state.phase = GamePhase::Playing;
        update(&mut state, BASELINE_FRAME_MS);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = state();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            tick(&mut state, &input, BASELINE_FRAME_MS);
            state.drain_events();
        }
        assert!(state.score > 0);
        assert!(state.ball.is_finite());
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs produce identical runs
        let mut state1 = state();
        let mut state2 = state();

        let inputs = [
            TickInput {
                paddle_delta: -40.0,
                ..Default::default()
            },
            TickInput {
                primary_action: true,
                ..Default::default()
            },
            TickInput {
                paddle_delta: 25.0,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, BASELINE_FRAME_MS);
                tick(&mut state2, input, BASELINE_FRAME_MS);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.paddle.x, state2.paddle.x);
    }
}
