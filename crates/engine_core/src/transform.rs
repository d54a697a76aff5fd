//! Transform for placing point clouds in the scene.

use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a transform at the origin with a uniform scale.
    pub fn from_uniform_scale(scale: f32) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Set an absolute rotation around the Y axis, replacing any previous rotation.
    pub fn set_rotation_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_scale_shrinks_points() {
        let t = Transform::from_uniform_scale(0.9);
        let p = t.to_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p.x - 0.9).abs() < 1e-6);
    }

    #[test]
    fn set_rotation_y_is_absolute() {
        let mut t = Transform::default();
        t.set_rotation_y(1.0);
        t.set_rotation_y(std::f32::consts::FRAC_PI_2);
        // +X rotated a quarter turn about Y lands on -Z
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!(p.x.abs() < 1e-5 && (p.z + 1.0).abs() < 1e-5, "got {p:?}");
    }
}
