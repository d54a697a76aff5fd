//! Regenerates families on demand and installs the results in the scene.

use engine_core::Transform;
use procgen::{BurstSizing, Family, GalaxyParameters, GenerationError, ParamId, ParamValue, RandomSource};
use renderer::PointMaterial;
use std::time::Instant;

use crate::scene::GalaxyScene;

/// Burst points are drawn at this fraction of the spiral's point size.
const BURST_SIZE_FACTOR: f32 = 0.2;

/// A committed panel edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamEdit {
    pub id: ParamId,
    pub value: ParamValue,
}

/// Owns the live parameter set and the random source, and rebuilds
/// families in `GalaxyScene` when asked.
pub struct RegenerationController {
    params: GalaxyParameters,
    rng: Box<dyn RandomSource>,
}

impl RegenerationController {
    pub fn new(params: GalaxyParameters, rng: Box<dyn RandomSource>) -> Self {
        Self { params, rng }
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    /// Rebuild `family` and install it in place of the previous object.
    /// On failure the previous object stays and the error is returned.
    pub fn regenerate(&mut self, scene: &mut GalaxyScene, family: Family) -> Result<usize, GenerationError> {
        let started = Instant::now();
        let buffer = family.generate(&self.params, self.rng.as_mut())?;
        let points = buffer.len();

        scene.replace(
            family,
            buffer,
            material_for(family, &self.params),
            transform_for(family, &self.params),
        );
        log::info!(
            "Regenerated {family}: {points} points in {:.1} ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(points)
    }

    /// Rebuild every family. Failures are logged; the other families still regenerate.
    pub fn regenerate_all(&mut self, scene: &mut GalaxyScene) {
        for family in Family::ALL {
            if let Err(e) = self.regenerate(scene, family) {
                log::error!("Failed to generate {family}: {e}");
            }
        }
    }

    /// Apply a committed edit and regenerate the family that owns it. A
    /// spiral count edit also rebuilds a burst whose size is derived from it.
    /// Returns the owning family when it was rebuilt.
    pub fn apply_edit(&mut self, scene: &mut GalaxyScene, edit: ParamEdit) -> Option<Family> {
        let Some(stored) = edit.id.apply(&mut self.params, edit.value) else {
            log::warn!("Ignoring edit {:?}: value does not fit the parameter", edit);
            return None;
        };
        let family = edit.id.family();
        log::info!("{} = {}", edit.id.control().label, edit.id.display(&self.params));
        log::debug!("Stored {:?}", stored);

        if edit.id == ParamId::Count && matches!(self.params.burst.sizing, BurstSizing::Derived { .. }) {
            if let Err(e) = self.regenerate(scene, Family::Burst) {
                log::warn!("Keeping previous {}: {e}", Family::Burst);
            }
        }

        match self.regenerate(scene, family) {
            Ok(_) => Some(family),
            Err(e) => {
                log::warn!("Keeping previous {family}: {e}");
                None
            }
        }
    }
}

/// Point material for `family` under `params`.
pub fn material_for(family: Family, params: &GalaxyParameters) -> PointMaterial {
    match family {
        Family::Spiral => PointMaterial::additive_vertex_colored(params.spiral.size),
        Family::Burst => PointMaterial::additive_vertex_colored(params.spiral.size * BURST_SIZE_FACTOR),
        Family::Core => PointMaterial::flat(params.core.size, params.core.color),
    }
}

/// Initial transform for `family`'s object.
pub fn transform_for(family: Family, params: &GalaxyParameters) -> Transform {
    match family {
        Family::Core => Transform::from_uniform_scale(params.core.scale),
        Family::Spiral | Family::Burst => Transform::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Color;
    use procgen::{CoreParams, RandSource, SpiralParams, VariantPolicies};
    use renderer::BlendMode;

    fn small_params() -> GalaxyParameters {
        GalaxyParameters {
            spiral: SpiralParams { count: 500, ..Default::default() },
            burst: procgen::BurstParams { particles_count: 200, ..Default::default() },
            core: CoreParams { particles: 100, ..Default::default() },
        }
    }

    fn controller() -> RegenerationController {
        RegenerationController::new(small_params(), Box::new(RandSource::seeded(7)))
    }

    #[test]
    fn regenerate_all_installs_every_family() {
        let mut scene = GalaxyScene::new();
        let mut controller = controller();
        controller.regenerate_all(&mut scene);
        for family in Family::ALL {
            assert_eq!(scene.count(family), 1, "{family}");
        }
        assert_eq!(scene.get(Family::Spiral).map(|c| c.buffer.len()), Some(500));
        assert_eq!(scene.get(Family::Burst).map(|c| c.buffer.len()), Some(200));
        assert_eq!(scene.get(Family::Core).map(|c| c.buffer.len()), Some(100));
    }

    #[test]
    fn repeated_regeneration_keeps_one_object() {
        let mut scene = GalaxyScene::new();
        let mut controller = controller();
        for _ in 0..5 {
            controller.regenerate(&mut scene, Family::Burst).unwrap();
        }
        assert_eq!(scene.count(Family::Burst), 1);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn edit_regenerates_only_owning_family() {
        let mut scene = GalaxyScene::new();
        let mut controller = controller();
        controller.regenerate_all(&mut scene);
        let spiral_before = scene.generation(Family::Spiral);
        let burst_before = scene.generation(Family::Burst);

        let edit = ParamEdit { id: ParamId::CoreParticles, value: ParamValue::Number(300.0) };
        assert_eq!(controller.apply_edit(&mut scene, edit), Some(Family::Core));
        assert_eq!(scene.get(Family::Core).map(|c| c.buffer.len()), Some(300));
        assert_eq!(scene.generation(Family::Spiral), spiral_before);
        assert_eq!(scene.generation(Family::Burst), burst_before);
    }

    #[test]
    fn count_edit_resizes_derived_burst() {
        let mut params = GalaxyParameters::with_policies(VariantPolicies::alternate());
        params.spiral.count = 900;
        params.core.particles = 100;
        let mut controller = RegenerationController::new(params, Box::new(RandSource::seeded(3)));
        let mut scene = GalaxyScene::new();
        controller.regenerate_all(&mut scene);
        assert_eq!(scene.get(Family::Burst).map(|c| c.buffer.len()), Some(300));

        let edit = ParamEdit { id: ParamId::Count, value: ParamValue::Number(3000.0) };
        assert_eq!(controller.apply_edit(&mut scene, edit), Some(Family::Spiral));
        assert_eq!(scene.get(Family::Spiral).map(|c| c.buffer.len()), Some(3000));
        assert_eq!(scene.get(Family::Burst).map(|c| c.buffer.len()), Some(1000));
        assert_eq!(scene.count(Family::Burst), 1);
    }

    #[test]
    fn count_edit_leaves_fixed_burst_alone() {
        let mut scene = GalaxyScene::new();
        let mut controller = controller();
        controller.regenerate_all(&mut scene);
        let burst_before = scene.generation(Family::Burst);

        let edit = ParamEdit { id: ParamId::Count, value: ParamValue::Number(1000.0) };
        controller.apply_edit(&mut scene, edit);
        assert_eq!(scene.generation(Family::Burst), burst_before);
        assert_eq!(scene.get(Family::Burst).map(|c| c.buffer.len()), Some(200));
    }

    #[test]
    fn color_edit_updates_core_material() {
        let mut scene = GalaxyScene::new();
        let mut controller = controller();
        let red = Color::from_hex("#ff0000").unwrap();
        let edit = ParamEdit { id: ParamId::CoreColor, value: ParamValue::Color(red) };
        controller.apply_edit(&mut scene, edit);
        assert_eq!(scene.get(Family::Core).map(|c| c.material.color), Some(red));
    }

    #[test]
    fn failed_generation_keeps_previous_object() {
        let mut scene = GalaxyScene::new();
        let mut params = small_params();
        let mut controller = RegenerationController::new(params.clone(), Box::new(RandSource::seeded(1)));
        controller.regenerate(&mut scene, Family::Spiral).unwrap();
        let before = scene.generation(Family::Spiral);

        params.spiral.branches = 0;
        controller.params = params;
        assert!(controller.regenerate(&mut scene, Family::Spiral).is_err());
        assert_eq!(scene.generation(Family::Spiral), before);
        assert_eq!(scene.count(Family::Spiral), 1);
    }

    #[test]
    fn mismatched_edit_is_ignored() {
        let mut scene = GalaxyScene::new();
        let mut controller = controller();
        let edit = ParamEdit { id: ParamId::Spin, value: ParamValue::Color(Color::WHITE) };
        assert_eq!(controller.apply_edit(&mut scene, edit), None);
        assert!(scene.is_empty());
    }

    #[test]
    fn materials_per_family() {
        let params = GalaxyParameters::default();
        let spiral = material_for(Family::Spiral, &params);
        let burst = material_for(Family::Burst, &params);
        let core = material_for(Family::Core, &params);

        assert_eq!(spiral.blend, BlendMode::Additive);
        assert!(!spiral.depth_write && spiral.vertex_colors);
        assert!((burst.size - params.spiral.size * 0.2).abs() < 1e-9);
        assert_eq!(core.blend, BlendMode::Normal);
        assert!(core.depth_write && !core.vertex_colors);
        assert_eq!(core.color, params.core.color);
        assert_eq!(transform_for(Family::Core, &params).scale, glam::Vec3::splat(0.9));
    }
}
