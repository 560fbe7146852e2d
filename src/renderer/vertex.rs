//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Arena pixels, y pointing down
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a vertex buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Map arena pixels to normalized device coordinates ([-1, 1], y up)
    pub fn to_clip(self, width: f32, height: f32) -> Self {
        let [x, y] = self.position;
        Self {
            position: [x / width * 2.0 - 1.0, 1.0 - y / height * 2.0],
            color: self.color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const OVERLAY_GAME_OVER: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const REINFORCED_HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.35];
}
