//! Point-sprite materials.

use bytemuck::{Pod, Zeroable};
use engine_core::Color;
use glam::Mat4;

/// How a point's color combines with what is already in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Standard alpha blending.
    Normal,
    /// `src * alpha + dst`: overlapping points brighten each other.
    Additive,
}

impl BlendMode {
    pub fn blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Normal => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }
}

/// Fixed-function state that needs its own pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub blend: BlendMode,
    pub depth_write: bool,
}

impl PipelineKey {
    /// Every combination the renderer builds up front.
    pub const ALL: [PipelineKey; 4] = [
        PipelineKey { blend: BlendMode::Normal, depth_write: true },
        PipelineKey { blend: BlendMode::Normal, depth_write: false },
        PipelineKey { blend: BlendMode::Additive, depth_write: true },
        PipelineKey { blend: BlendMode::Additive, depth_write: false },
    ];
}

/// Appearance of a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    /// Point size. World units when `size_attenuation` is on, pixels otherwise.
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
    pub blend: BlendMode,
    pub depth_write: bool,
    /// Use per-point colors (multiplied by `color`).
    pub vertex_colors: bool,
    /// Flat color, linear RGB.
    pub color: Color,
    pub opacity: f32,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            size: 1.0,
            size_attenuation: true,
            blend: BlendMode::Normal,
            depth_write: true,
            vertex_colors: false,
            color: Color::WHITE,
            opacity: 1.0,
        }
    }
}

impl PointMaterial {
    /// Glowing points colored per vertex; they never occlude each other.
    pub fn additive_vertex_colored(size: f32) -> Self {
        Self {
            size,
            blend: BlendMode::Additive,
            depth_write: false,
            vertex_colors: true,
            ..Default::default()
        }
    }

    /// Opaque points in a single color.
    pub fn flat(size: f32, color: Color) -> Self {
        Self { size, color, ..Default::default() }
    }

    pub fn pipeline_key(&self) -> PipelineKey {
        PipelineKey { blend: self.blend, depth_write: self.depth_write }
    }
}

/// Per-cloud uniform (must match points.wgsl Cloud).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CloudUniform {
    pub model: [[f32; 4]; 4],
    /// rgb = flat color, a = opacity.
    pub color: [f32; 4],
    /// x = size, y = attenuation (0/1), z = vertex colors (0/1), w unused.
    pub params: [f32; 4],
}

impl CloudUniform {
    pub fn new(material: &PointMaterial, model: Mat4) -> Self {
        let [r, g, b] = material.color.to_array();
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            params: [
                material.size,
                if material.size_attenuation { 1.0 } else { 0.0 },
                if material.vertex_colors { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_material_skips_depth_write() {
        let material = PointMaterial::additive_vertex_colored(0.01);
        assert_eq!(
            material.pipeline_key(),
            PipelineKey { blend: BlendMode::Additive, depth_write: false }
        );
        assert!(material.vertex_colors && material.size_attenuation);
        assert!(PipelineKey::ALL.contains(&material.pipeline_key()));
    }

    #[test]
    fn flat_material_is_opaque_and_writes_depth() {
        let color = Color::from_hex("#f8d4c9").unwrap();
        let material = PointMaterial::flat(0.01, color);
        assert_eq!(material.opacity, 1.0);
        assert!(material.depth_write && !material.vertex_colors);
        assert_eq!(material.blend, BlendMode::Normal);
    }

    #[test]
    fn uniform_packs_material() {
        assert_eq!(std::mem::size_of::<CloudUniform>(), 96);
        let material = PointMaterial::additive_vertex_colored(0.002);
        let uniform = CloudUniform::new(&material, Mat4::from_scale(glam::Vec3::splat(0.9)));
        assert_eq!(uniform.params, [0.002, 1.0, 1.0, 0.0]);
        assert_eq!(uniform.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(uniform.model[0][0], 0.9);
    }
}
