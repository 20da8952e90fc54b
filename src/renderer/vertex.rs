//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> [f32; 4] {
    rgba(hex, 1.0)
}

/// Color from a 0xRRGGBB literal with explicit alpha
pub const fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for scene elements
pub mod colors {
    use super::{rgb, rgba};

    // Force/mass canvas
    pub const TRACK_BACKGROUND: [f32; 4] = rgb(0xf0f4f8);
    pub const TRACK_GROUND: [f32; 4] = rgb(0x4a5568);
    pub const BODY_FILL: [f32; 4] = rgb(0x3182ce);
    pub const BODY_OUTLINE: [f32; 4] = rgb(0x2c5282);
    pub const FORCE_ARROW: [f32; 4] = rgb(0xe53e3e);
    pub const BODY_VELOCITY: [f32; 4] = rgb(0x38a169);

    // Projectile canvas
    pub const SKY_TOP: [f32; 4] = rgb(0x87ceeb);
    pub const SKY_BOTTOM: [f32; 4] = rgb(0x98fb98);
    pub const GRID: [f32; 4] = rgba(0xffffff, 0.3);
    pub const FIELD_GROUND: [f32; 4] = rgb(0x8b4513);
    pub const EMITTER_BASE: [f32; 4] = rgb(0x4a4a4a);
    pub const EMITTER_BARREL: [f32; 4] = rgb(0x2a2a2a);
    pub const TRAIL: [f32; 4] = rgba(0xff0000, 0.6);
    pub const PROJECTILE_FILL: [f32; 4] = rgb(0xff4444);
    pub const PROJECTILE_OUTLINE: [f32; 4] = rgb(0xcc0000);
    pub const PROJECTILE_VELOCITY: [f32; 4] = rgb(0x00aa00);
    pub const ANGLE_INDICATOR: [f32; 4] = rgb(0x333333);

    pub const CLEAR: [f32; 4] = rgb(0xffffff);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0x00ff00, 0.5), [0.0, 1.0, 0.0, 0.5]);
        let [r, g, b, _] = rgb(0x808080);
        assert!((r - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
