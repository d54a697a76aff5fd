//! GPU-side point clouds.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::material::{CloudUniform, PointMaterial};
use crate::vertex::PointInstance;

/// A point cloud uploaded to the GPU.
///
/// An empty cloud owns no instance buffer and draws nothing.
pub struct GpuPointCloud {
    instance_buffer: Option<wgpu::Buffer>,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    material: PointMaterial,
}

impl GpuPointCloud {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        instances: &[PointInstance],
        material: PointMaterial,
        model: Mat4,
    ) -> Self {
        let instance_buffer = (!instances.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Instances")),
                contents: bytemuck::cast_slice(instances),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let uniform = CloudUniform::new(&material, model);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Uniform")),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            instance_buffer,
            instance_count: instances.len() as u32,
            uniform_buffer,
            bind_group,
            material,
        }
    }

    /// Rewrite the model matrix and material uniform.
    pub fn update(&mut self, queue: &wgpu::Queue, material: PointMaterial, model: Mat4) {
        self.material = material;
        let uniform = CloudUniform::new(&material, model);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    pub fn is_empty(&self) -> bool {
        self.instance_buffer.is_none()
    }

    /// Free the GPU buffers now rather than when the last command using them retires.
    pub fn release(self) {
        if let Some(buffer) = self.instance_buffer {
            buffer.destroy();
        }
        self.uniform_buffer.destroy();
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(buffer) = &self.instance_buffer else {
            return;
        };
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, buffer.slice(..));
        pass.draw(0..PointInstance::QUAD_VERTICES, 0..self.instance_count);
    }
}
