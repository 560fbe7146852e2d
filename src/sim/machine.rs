//! Game state machine
//!
//! Init -> Playing -> (LevelComplete | GameOver | Victory) -> Init.
//! Input that a phase does not accept is silently ignored.

use glam::Vec2;
use rand::Rng;

use super::level::generate_level;
use super::state::{GameEvent, GamePhase, GameState, Session};

impl GameState {
    /// Move the paddle by a resolved horizontal delta
    ///
    /// Accepted while serving or playing. The paddle is kept fully inside the
    /// arena; while serving the ball rides along.
    pub fn move_paddle(&mut self, delta_x: f32) {
        if !matches!(self.phase, GamePhase::Init | GamePhase::Playing) {
            return;
        }
        if !delta_x.is_finite() {
            log::warn!("Ignoring non-finite paddle delta {}", delta_x);
            return;
        }

        let x = self.paddle.clamp_x(self.paddle.x + delta_x, self.arena.width);
        self.paddle.set_position_x(x);

        if self.phase == GamePhase::Init {
            self.ball.pos.x = x;
        }
    }

    /// Tap/click/space: launch, advance a level, or restart depending on phase
    pub fn on_primary_action(&mut self) {
        match self.phase {
            GamePhase::Init => self.launch(),
            GamePhase::LevelComplete => self.start_next_level(),
            GamePhase::GameOver | GamePhase::Victory => self.restart(),
            GamePhase::Playing => {}
        }
    }

    /// Launch the resting ball at a random angle around straight up
    fn launch(&mut self) {
        let speed = self.session.launch_speed(&self.arena);
        let half_spread = self.config.launch_spread / 2.0;
        let jitter = if half_spread > 0.0 {
            self.rng.random_range(-half_spread..half_spread)
        } else {
            0.0
        };
        let angle = -std::f32::consts::FRAC_PI_2 + jitter;

        self.ball.speed = speed;
        self.ball.set_heading(angle);
        self.phase = GamePhase::Playing;

        log::info!(
            "Launch: speed={:.3} angle={:.1}deg vel=({:.3}, {:.3})",
            speed,
            angle.to_degrees(),
            self.ball.vel.x,
            self.ball.vel.y
        );
        self.events.push(GameEvent::Launched { speed });
    }

    /// Ball fell out of the bottom
    pub(crate) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.combo = 0;
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });

        if self.lives > 0 {
            log::info!("Life lost, {} remaining", self.lives);
            self.ball.rest_on(&self.paddle);
            self.phase = GamePhase::Init;
        } else {
            log::info!("Game over with score {}", self.score);
            self.ball.vel = Vec2::ZERO;
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
        }
    }

    /// Last block destroyed
    pub(crate) fn complete_level(&mut self) {
        self.events.push(GameEvent::LevelComplete { level: self.level });

        if self.config.final_level == Some(self.level) {
            log::info!("Final level {} cleared, score {}", self.level, self.score);
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory { score: self.score });
        } else {
            log::info!("Level {} complete, score {}", self.level, self.score);
            self.phase = GamePhase::LevelComplete;
        }
    }

    fn start_next_level(&mut self) {
        self.level += 1;
        self.session.advance_level(self.config.level_speed_multiplier);
        self.combo = 0;
        generate_level(self);
        self.phase = GamePhase::Init;
    }

    /// Full reset: score, lives, level, speed and layout
    fn restart(&mut self) {
        log::info!("Restart (previous score {})", self.score);
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = 1;
        self.combo = 0;
        self.session = Session::new(&self.config);
        self.particles.clear();
        generate_level(self);
        self.phase = GamePhase::Init;
    }

    /// Rescale every entity for a resized arena
    ///
    /// Positions, sizes and velocities scale by the per-axis ratio; the ball
    /// radius follows the horizontal ratio so it stays round.
    pub fn rescale(&mut self, old_width: f32, old_height: f32, new_width: f32, new_height: f32) {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if ![old_width, old_height, new_width, new_height]
            .into_iter()
            .all(valid)
        {
            log::warn!(
                "Ignoring rescale {}x{} -> {}x{}",
                old_width,
                old_height,
                new_width,
                new_height
            );
            return;
        }
        if old_width == new_width && old_height == new_height {
            return;
        }

        let scale = Vec2::new(new_width / old_width, new_height / old_height);
        log::debug!(
            "Rescale {}x{} -> {}x{} (scale {:?})",
            old_width,
            old_height,
            new_width,
            new_height,
            scale
        );

        self.arena.width = new_width;
        self.arena.height = new_height;

        self.paddle.x *= scale.x;
        self.paddle.y *= scale.y;
        self.paddle.width *= scale.x;
        self.paddle.height *= scale.y;

        self.ball.pos *= scale;
        self.ball.vel *= scale;
        self.ball.radius *= scale.x;
        self.ball.speed = if self.ball.vel == Vec2::ZERO {
            self.ball.speed * scale.y
        } else {
            self.ball.vel.length()
        };

        for block in &mut self.blocks {
            block.pos *= scale;
            block.size *= scale;
        }

        for particle in &mut self.particles {
            particle.pos *= scale;
            particle.vel *= scale;
        }
    }
}
