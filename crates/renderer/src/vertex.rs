//! Instance layout for point sprites.

use bytemuck::{Pod, Zeroable};

/// One point, drawn as a camera-facing quad. The quad's corners come from
/// the vertex index, so no per-vertex buffer is bound.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl PointInstance {
    /// Vertices per point quad (triangle strip).
    pub const QUAD_VERTICES: u32 = 4;

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }

    /// Interleave positions with per-point colors. Without colors every
    /// point gets white and the material's flat color takes over.
    pub fn interleave(positions: &[[f32; 3]], colors: Option<&[[f32; 3]]>) -> Vec<PointInstance> {
        match colors {
            Some(colors) => positions
                .iter()
                .zip(colors.iter().chain(std::iter::repeat(&[1.0; 3])))
                .map(|(&position, &color)| PointInstance { position, color })
                .collect(),
            None => positions
                .iter()
                .map(|&position| PointInstance { position, color: [1.0; 3] })
                .collect(),
        }
    }
}
