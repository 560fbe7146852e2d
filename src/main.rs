//! Block Breaker headless driver
//!
//! Runs the simulation in demo mode at a steady 60 fps, feeding every frame to
//! a mesh renderer, and prints a JSON summary at the end.
//!
//! Usage: `block-breaker [config.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::Path;

    use block_breaker::GameConfig;
    use block_breaker::consts::BASELINE_FRAME_MS;
    use block_breaker::renderer::{MeshSink, render};
    use block_breaker::sim::{GameEvent, GameState, TickInput, tick};

    const ARENA_WIDTH: f32 = 800.0;
    const ARENA_HEIGHT: f32 = 600.0;
    const DEFAULT_FRAMES: u64 = 60 * 60;

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut config_path = None;
        let mut frames = DEFAULT_FRAMES;
        for arg in std::env::args().skip(1) {
            if arg.ends_with(".json") {
                config_path = Some(arg);
            } else {
                frames = arg.parse()?;
            }
        }

        let config = match config_path {
            Some(path) => GameConfig::load(Path::new(&path))?,
            None => GameConfig::default(),
        };

        let mut state = GameState::new(config, ARENA_WIDTH, ARENA_HEIGHT)?;
        let mut sink = MeshSink::new();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut bounces = 0u64;
        for frame in 0..frames {
            // Exercise a window resize halfway through
            if frame == frames / 2 {
                let (w, h) = (state.arena.width, state.arena.height);
                state.rescale(w, h, w * 1.25, h * 1.25);
            }

            tick(&mut state, &input, BASELINE_FRAME_MS);

            for event in state.drain_events() {
                match event {
                    GameEvent::PaddleHit { .. } => bounces += 1,
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("Frame {}: life lost ({} left)", frame, lives_left)
                    }
                    GameEvent::LevelComplete { level } => {
                        log::info!("Frame {}: level {} cleared", frame, level)
                    }
                    GameEvent::BlockDestroyed { id, points, combo } if combo > 2 => {
                        log::debug!("Frame {}: block {} +{} (combo {})", frame, id, points, combo)
                    }
                    _ => {}
                }
            }

            render(&state, &mut sink);
        }

        let summary = serde_json::json!({
            "frames": frames,
            "phase": state.phase,
            "score": state.score,
            "level": state.level,
            "lives": state.lives,
            "blocks_left": state.active_blocks(),
            "paddle_bounces": bounces,
            "arena": state.arena,
            "last_frame_vertices": sink.vertices().len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Block Breaker (headless) starting...");

    match native::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the simulation through the library
}
