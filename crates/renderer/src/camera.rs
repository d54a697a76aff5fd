//! Orbit camera for inspecting the galaxy.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLAR_EPSILON: f32 = 1e-4;

/// Perspective camera orbiting a target point, with damped rotation.
///
/// Input (`rotate`, `zoom`) only queues motion; `update` applies a
/// `damping` fraction of the queued rotation each frame and decays the rest,
/// so the view keeps gliding briefly after the mouse stops.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera looks at and orbits around.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Fraction of the pending rotation applied per update, in (0, 1].
    pub damping: f32,
    pub rotate_speed: f32,
    /// Per-line zoom factor (< 1 zooms in on positive scroll).
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance from the target.
    distance: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    azimuth: f32,
    /// Polar angle from +Y.
    polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            aspect: 16.0 / 9.0,
            damping: 0.05,
            rotate_speed: 1.0,
            zoom_step: 0.95,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            distance: 1.0,
            azimuth: 0.0,
            polar: std::f32::consts::FRAC_PI_2,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }
}

impl OrbitCamera {
    /// Create a camera at `position` looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self { target, ..Default::default() };
        camera.set_position(position);
        camera
    }

    /// Move the camera to `position`, keeping the target. Clears pending motion.
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.distance = offset.length();
        if self.distance > 0.0 {
            self.azimuth = offset.x.atan2(offset.z);
            self.polar = (offset.y / self.distance).clamp(-1.0, 1.0).acos();
        } else {
            self.azimuth = 0.0;
            self.polar = std::f32::consts::FRAC_PI_2;
        }
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_scale = 1.0;
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Queue a drag of `(dx, dy)` pixels in a viewport `viewport_height` pixels tall.
    /// A drag across the full height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let per_pixel = std::f32::consts::TAU * self.rotate_speed / viewport_height.max(1.0);
        self.pending_azimuth -= dx * per_pixel;
        self.pending_polar -= dy * per_pixel;
    }

    /// Queue a zoom of `lines` scroll lines. Positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.pending_scale *= self.zoom_step.powf(lines);
    }

    /// Apply queued motion. Call once per frame.
    pub fn update(&mut self) {
        let damping = self.damping.clamp(f32::EPSILON, 1.0);

        self.azimuth += self.pending_azimuth * damping;
        self.polar = (self.polar + self.pending_polar * damping)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.distance = (self.distance * self.pending_scale).clamp(self.min_distance, self.max_distance);

        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;
        self.pending_scale = 1.0;
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.distance * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    /// Distance from the target.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform data for GPU (must match points.wgsl Camera).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// x = width, y = height in physical pixels, zw unused.
    pub viewport: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            viewport: [1.0, 1.0, 0.0, 0.0],
        }
    }

    pub fn update(&mut self, camera: &OrbitCamera, width: u32, height: u32) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        self.viewport = [width.max(1) as f32, height.max(1) as f32, 0.0, 0.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
