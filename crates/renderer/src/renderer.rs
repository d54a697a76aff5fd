//! Main renderer managing wgpu state and point-cloud drawing.

use crate::{
    camera::{CameraUniform, OrbitCamera},
    material::{PipelineKey, PointMaterial},
    pipeline::{
        create_camera_bind_group_layout, create_cloud_bind_group_layout, create_point_pipeline,
        create_points_shader,
    },
    point_cloud::GpuPointCloud,
    texture::Texture,
    vertex::PointInstance,
};
use anyhow::Result;
use glam::Mat4;
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Scene background.
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

/// Owns the GPU device, the window surface and the point pipelines.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    // One pipeline per blend/depth-write combination
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    camera_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,
    cloud_bind_group_layout: wgpu::BindGroupLayout,

    depth_texture: Texture,
}

impl Renderer {
    /// Set up wgpu for `window`. With `vsync` off frames are presented immediately.
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Galaxy Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Prefer an sRGB surface so linear colors are encoded on write
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let present_mode = if vsync {
            // Mailbox presents the most recent frame at vblank without tearing
            surface_caps
                .present_modes
                .iter()
                .find(|m| matches!(m, wgpu::PresentMode::Mailbox))
                .copied()
                .unwrap_or(wgpu::PresentMode::AutoVsync)
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface {}x{} {:?}, present mode {:?}",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        // Camera uniform
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = create_camera_bind_group_layout(&device);
        let cloud_bind_group_layout = create_cloud_bind_group_layout(&device);

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let shader = create_points_shader(&device);
        let pipelines = PipelineKey::ALL
            .into_iter()
            .map(|key| {
                let pipeline = create_point_pipeline(
                    &device,
                    &shader,
                    config.format,
                    &camera_bind_group_layout,
                    &cloud_bind_group_layout,
                    key,
                );
                (key, pipeline)
            })
            .collect();

        let depth_texture =
            Texture::create_depth_texture(&device, config.width, config.height, "Depth Texture");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            pipelines,
            camera_bind_group,
            camera_buffer,
            camera_uniform,
            cloud_bind_group_layout,
            depth_texture,
        })
    }

    /// Resize the surface and depth buffer. Zero-sized windows are ignored.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Texture::create_depth_texture(
                &self.device,
                self.config.width,
                self.config.height,
                "Depth Texture",
            );
        }
    }

    /// Reconfigure the surface at its current size (after `SurfaceError::Lost`/`Outdated`).
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    /// Write the camera matrices for this frame.
    pub fn update_camera(&mut self, camera: &OrbitCamera) {
        self.camera_uniform
            .update(camera, self.config.width, self.config.height);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Upload a point cloud. `colors`, when present, must be index-aligned with `positions`.
    pub fn upload_point_cloud(
        &self,
        label: &str,
        positions: &[[f32; 3]],
        colors: Option<&[[f32; 3]]>,
        material: PointMaterial,
        model: Mat4,
    ) -> GpuPointCloud {
        let instances = PointInstance::interleave(positions, colors);
        let cloud = GpuPointCloud::new(
            &self.device,
            &self.cloud_bind_group_layout,
            label,
            &instances,
            material,
            model,
        );
        log::debug!("Uploaded {label}: {} instances", cloud.instance_count());
        cloud
    }

    /// Rewrite a cloud's transform and material without touching its points.
    pub fn update_point_cloud(&self, cloud: &mut GpuPointCloud, material: PointMaterial, model: Mat4) {
        cloud.update(&self.queue, material, model);
    }

    /// Acquire the next surface texture and an encoder for it.
    pub fn begin_frame(&mut self) -> Result<(wgpu::SurfaceTexture, wgpu::CommandEncoder), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Galaxy Frame Encoder"),
        });
        Ok((output, encoder))
    }

    /// Clear the frame and draw `clouds`. Depth-writing clouds go first so
    /// blended clouds are depth-tested against them.
    pub fn render_point_clouds(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clouds: &[&GpuPointCloud],
    ) {
        let mut ordered: Vec<&GpuPointCloud> = clouds.iter().copied().filter(|c| !c.is_empty()).collect();
        ordered.sort_by_key(|c| !c.material().depth_write);

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Point Cloud Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        for cloud in ordered {
            let Some(pipeline) = self.pipelines.get(&cloud.material().pipeline_key()) else {
                log::warn!("No pipeline for {:?}", cloud.material().pipeline_key());
                continue;
            };
            render_pass.set_pipeline(pipeline);
            cloud.draw(&mut render_pass);
        }
    }

    /// Submit the encoder and present.
    pub fn end_frame(&self, output: wgpu::SurfaceTexture, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    /// Surface size in physical pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
