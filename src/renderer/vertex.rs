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

/// Colors for game elements
pub mod colors {
    use crate::config::Rgba;

    pub const BACKGROUND: Rgba = Rgba::rgb(0x0f, 0x17, 0x2a);
    pub const PADDLE_EDGE: Rgba = Rgba::rgb(0x66, 0x7e, 0xea);
    pub const PADDLE_CENTER: Rgba = Rgba::rgb(0x8b, 0x5c, 0xf6);
    pub const BALL: Rgba = Rgba::rgb(0x00, 0xf2, 0xfe);
    pub const BALL_RIM: Rgba = Rgba::rgb(0x0e, 0xa5, 0xe9);
    pub const OVERLAY: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
}
