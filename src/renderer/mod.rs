//! Rendering
//!
//! The simulation never draws. Once per frame the driver hands a [`Snapshot`]
//! to a [`RenderSink`]; [`MeshSink`] turns it into a flat triangle list ready
//! for a vertex buffer.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::consts::{BACKGROUND_COLOR, BALL_COLOR, PADDLE_COLOR};
use crate::rgb_to_rgba;
use crate::sim::{BlockKind, GamePhase, GameState, Snapshot};
pub use vertex::Vertex;

/// Maximum screen shake displacement (pixels)
pub const SHAKE_AMPLITUDE: f32 = 5.0;
/// Particle life (baseline frames) at which particles start fading
pub const PARTICLE_FADE: f32 = 30.0;
/// Particle quad edge length (pixels)
pub const PARTICLE_SIZE: f32 = 4.0;
/// Triangle fan segments for the ball
pub const BALL_SEGMENTS: u32 = 24;
/// Block border width (pixels)
pub const BLOCK_STROKE: f32 = 2.0;

/// Anything that can present a frame
pub trait RenderSink {
    fn draw(&mut self, snapshot: &Snapshot<'_>);
}

/// Hand the current state to a sink
pub fn render<S: RenderSink + ?Sized>(state: &GameState, sink: &mut S) {
    sink.draw(&state.snapshot());
}

/// Pseudo-random shake offset, stable for a given frame
pub fn shake_offset(shake: f32, frame: u64) -> Vec2 {
    if shake <= 0.0 {
        return Vec2::ZERO;
    }
    let t = frame as f32;
    Vec2::new((t * 12.9898).sin(), (t * 78.233).sin()) * SHAKE_AMPLITUDE
}

/// Builds triangles for every visible entity
#[derive(Debug, Default)]
pub struct MeshSink {
    vertices: Vec<Vertex>,
    /// Frames drawn so far
    pub frames: u64,
}

impl MeshSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triangles of the last drawn frame, in arena pixels
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes of the last frame for a GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn push_offset(&mut self, verts: impl IntoIterator<Item = Vertex>, offset: Vec2) {
        self.vertices.extend(verts.into_iter().map(|mut v| {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v
        }));
    }
}

impl RenderSink for MeshSink {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        self.vertices.clear();
        self.frames += 1;

        let arena = Vec2::new(snapshot.arena.width, snapshot.arena.height);
        let background = rgb_to_rgba(BACKGROUND_COLOR, 1.0);
        let shake = shake_offset(snapshot.shake, snapshot.frames);

        // Background overdraws the shake margin
        let margin = Vec2::splat(SHAKE_AMPLITUDE * 2.0);
        self.vertices
            .extend(shapes::rect(-margin, arena + margin * 2.0, background));

        let paddle = snapshot.paddle;
        self.push_offset(
            shapes::rect(
                Vec2::new(paddle.left(), paddle.y),
                Vec2::new(paddle.width, paddle.height),
                rgb_to_rgba(PADDLE_COLOR, 1.0),
            ),
            shake,
        );

        let ball = snapshot.ball;
        self.push_offset(
            shapes::circle(
                ball.pos,
                ball.radius,
                rgb_to_rgba(BALL_COLOR, 1.0),
                BALL_SEGMENTS,
            ),
            shake,
        );

        for block in snapshot.blocks.iter().filter(|b| b.active) {
            let fill = rgb_to_rgba(block.color, 1.0);
            self.push_offset(
                shapes::outlined_rect(block.pos, block.size, fill, background, BLOCK_STROKE),
                shake,
            );
            // Reinforced blocks show their extra hit
            if block.kind == BlockKind::Reinforced && block.health > 1 {
                let inset = Vec2::splat(BLOCK_STROKE * 2.0);
                self.push_offset(
                    shapes::rect(
                        block.pos + inset,
                        (block.size - inset * 2.0).max(Vec2::ZERO),
                        vertex::colors::REINFORCED_HIGHLIGHT,
                    ),
                    shake,
                );
            }
        }

        for particle in snapshot.particles {
            let alpha = (particle.life / PARTICLE_FADE).clamp(0.0, 1.0);
            self.push_offset(
                shapes::rect(
                    particle.pos,
                    Vec2::splat(PARTICLE_SIZE),
                    rgb_to_rgba(particle.color, alpha),
                ),
                shake,
            );
        }

        // Dim the field while waiting for input; text is the HUD's job
        let overlay = match snapshot.phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(vertex::colors::OVERLAY_GAME_OVER),
            GamePhase::Init | GamePhase::LevelComplete | GamePhase::Victory => {
                Some(vertex::colors::OVERLAY)
            }
        };
        if let Some(color) = overlay {
            self.vertices.extend(shapes::rect(Vec2::ZERO, arena, color));
        }
    }
}
