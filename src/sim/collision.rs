//! Collision detection and response
//!
//! Circle against the arena walls, the paddle and axis-aligned blocks. The
//! checks are pure; the `resolve_*` functions and [`wall_collision`] mutate
//! only the ball they are given.

use glam::Vec2;

use super::state::{Ball, Block, Paddle};

/// Result of a wall check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    /// Left, right or top wall was hit (and resolved)
    pub hit_side: bool,
    /// Ball has fallen entirely below the arena
    pub crossed_bottom: bool,
}

/// Result of a block check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    pub collided: bool,
    /// Closest point on the block to the ball center
    pub contact: Vec2,
}

impl BlockHit {
    pub fn miss() -> Self {
        Self {
            collided: false,
            contact: Vec2::ZERO,
        }
    }
}

/// Keep the ball inside the left, right and top walls
///
/// Contact clamps the ball back inside and inverts the matching velocity
/// component. The bottom is open: falling out is reported, never resolved.
pub fn wall_collision(ball: &mut Ball, width: f32, height: f32) -> WallHit {
    let r = ball.radius;
    let mut hit_side = false;

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = -ball.vel.x;
        hit_side = true;
    }
    if ball.pos.x + r > width {
        ball.pos.x = width - r;
        ball.vel.x = -ball.vel.x;
        hit_side = true;
    }
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = -ball.vel.y;
        hit_side = true;
    }

    WallHit {
        hit_side,
        crossed_bottom: ball.pos.y - r > height,
    }
}

/// Check whether a descending ball is touching the paddle
///
/// A ball moving up through the paddle never counts, so one contact cannot
/// bounce twice.
pub fn paddle_collision(ball: &Ball, paddle: &Paddle) -> bool {
    let overlaps = ball.pos.y + ball.radius >= paddle.y
        && ball.pos.y - ball.radius <= paddle.bottom()
        && ball.pos.x >= paddle.left()
        && ball.pos.x <= paddle.right();

    overlaps && ball.vel.y > 0.0
}

/// Redirect the ball off the paddle
///
/// The outgoing direction depends only on where the ball struck: the center
/// sends it straight up, the edges at `max_angle` from vertical. Incoming
/// direction is ignored. Returns the normalized offset in [-1, 1].
pub fn resolve_paddle_bounce(ball: &mut Ball, paddle: &Paddle, max_angle: f32) -> f32 {
    let offset = ((ball.pos.x - paddle.x) / paddle.half_width()).clamp(-1.0, 1.0);
    let angle = offset * max_angle;

    ball.vel = Vec2::new(ball.speed * angle.sin(), -ball.speed * angle.cos());
    offset
}

/// Circle vs rectangle using the closest point on the rectangle
pub fn block_collision(ball: &Ball, block: &Block) -> BlockHit {
    let contact = ball.pos.clamp(block.pos, block.pos + block.size);
    let dist_sq = (ball.pos - contact).length_squared();

    if dist_sq < ball.radius * ball.radius {
        BlockHit {
            collided: true,
            contact,
        }
    } else {
        BlockHit::miss()
    }
}

/// Bounce the ball off a block along one axis
///
/// The axis with the smaller penetration is treated as the struck side: its
/// velocity component flips and the ball is pushed out by the overlap, away
/// from the block center. Only one axis is corrected, so a corner hit can pick
/// the other face.
pub fn resolve_block_bounce(ball: &mut Ball, block: &Block) {
    let center = block.center();
    let half = block.half_size();
    let delta = ball.pos - center;

    let overlap_x = ball.radius + half.x - delta.x.abs();
    let overlap_y = ball.radius + half.y - delta.y.abs();

    if overlap_x < overlap_y {
        // Vertical face
        ball.vel.x = -ball.vel.x;
        if ball.pos.x < center.x {
            ball.pos.x -= overlap_x;
        } else {
            ball.pos.x += overlap_x;
        }
    } else {
        // Horizontal face
        ball.vel.y = -ball.vel.y;
        if ball.pos.y < center.y {
            ball.pos.y -= overlap_y;
        } else {
            ball.pos.y += overlap_y;
        }
    }
}
