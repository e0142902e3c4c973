//! View transform uniform for the figure quad.

use bytemuck::{Pod, Zeroable};

/// 4x4 column-major transform applied to the figure quad in clip space.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub matrix: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new() -> Self {
        Self {
            matrix: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Build a transform from a per-axis fit scale, a pan offset (clip space)
    /// and a uniform zoom factor.
    pub fn from_view(scale_x: f32, scale_y: f32, offset_x: f32, offset_y: f32, zoom: f32) -> Self {
        Self {
            matrix: [
                [scale_x * zoom, 0.0, 0.0, 0.0],
                [0.0, scale_y * zoom, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [offset_x, offset_y, 0.0, 1.0],
            ],
        }
    }

    /// Per-axis scale that fits a `content` sized quad inside a `surface`
    /// sized viewport without distorting its aspect ratio.
    pub fn letterbox_scale(content: (u32, u32), surface: (u32, u32)) -> (f32, f32) {
        let content_aspect = content.0.max(1) as f32 / content.1.max(1) as f32;
        let surface_aspect = surface.0.max(1) as f32 / surface.1.max(1) as f32;

        if content_aspect > surface_aspect {
            (1.0, surface_aspect / content_aspect)
        } else {
            (content_aspect / surface_aspect, 1.0)
        }
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::new()
    }
}
