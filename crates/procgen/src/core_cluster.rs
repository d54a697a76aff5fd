//! Core cluster: a ball of points at the galaxy's center.
//!
//! Directions are uniform on the sphere (latitude via `acos(2u - 1)`), but the
//! radius is a plain uniform draw rather than a cube root, so the ball is
//! denser toward its center than a volume-uniform fill would be.

use std::f32::consts::TAU;

use crate::buffer::PointBuffer;
use crate::error::GenerationError;
use crate::params::CoreParams;
use crate::random::RandomSource;

/// Core cluster generator. Produces positions only; the color is a material constant.
pub struct CoreCluster;

impl CoreCluster {
    pub fn generate<R: RandomSource + ?Sized>(
        params: &CoreParams,
        rng: &mut R,
    ) -> Result<PointBuffer, GenerationError> {
        params.validate()?;

        let mut buffer = PointBuffer::positions_only(params.particles);
        for _ in 0..params.particles {
            let radius = rng.next();
            let theta = rng.up_to(TAU);
            let phi = (2.0 * rng.next() - 1.0).clamp(-1.0, 1.0).acos();

            let (sin_phi, cos_phi) = phi.sin_cos();
            buffer.push_position([
                radius * sin_phi * theta.cos(),
                radius * sin_phi * theta.sin(),
                radius * cos_phi,
            ]);
        }

        log::debug!("core: {} points", buffer.len());
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RandSource, SequenceSource};

    fn length(p: &[f32; 3]) -> f32 {
        (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
    }

    #[test]
    fn points_stay_inside_unit_ball() {
        let params = CoreParams { particles: 20_000, ..Default::default() };
        let buffer = CoreCluster::generate(&params, &mut RandSource::seeded(8)).unwrap();
        assert_eq!(buffer.flat_positions().len(), 20_000 * 3);
        assert!(buffer.colors.is_none());
        for p in &buffer.positions {
            assert!(length(p) <= 1.0 + 1e-6, "{p:?} outside unit ball");
        }
    }

    #[test]
    fn scale_is_not_baked_into_positions() {
        let params = CoreParams { particles: 1, scale: 0.5, ..Default::default() };
        // r = 0.75, theta = 0, phi = acos(0) = pi/2 => (0.75, 0, 0)
        let mut draws = SequenceSource::new(vec![0.75, 0.0, 0.5]);
        let buffer = CoreCluster::generate(&params, &mut draws).unwrap();
        let p = buffer.positions[0];
        assert!((p[0] - 0.75).abs() < 1e-6 && p[1].abs() < 1e-6 && p[2].abs() < 1e-6, "{p:?}");
    }

    #[test]
    fn hemispheres_are_balanced() {
        // Latitude sampled by inverse CDF: no pole bias
        let params = CoreParams { particles: 10_000, ..Default::default() };
        let buffer = CoreCluster::generate(&params, &mut RandSource::seeded(12)).unwrap();
        let polar = buffer
            .positions
            .iter()
            .filter(|p| {
                let len = length(p);
                len > 0.0 && (p[2] / len).abs() > 0.5
            })
            .count();
        // Uniform directions put half the sphere's area at |cos(phi)| > 0.5
        let fraction = polar as f32 / buffer.len() as f32;
        assert!((fraction - 0.5).abs() < 0.03, "polar fraction {fraction}");
    }

    #[test]
    fn radial_density_is_center_biased() {
        let params = CoreParams { particles: 10_000, ..Default::default() };
        let buffer = CoreCluster::generate(&params, &mut RandSource::seeded(13)).unwrap();
        let inner = buffer.positions.iter().filter(|p| length(p) < 0.5).count();
        // Uniform radius puts ~50% inside r = 0.5 (a volume-uniform fill would put 12.5%)
        let fraction = inner as f32 / buffer.len() as f32;
        assert!((fraction - 0.5).abs() < 0.03, "inner fraction {fraction}");
    }

    #[test]
    fn zero_particles_is_empty() {
        let params = CoreParams { particles: 0, ..Default::default() };
        assert!(CoreCluster::generate(&params, &mut RandSource::seeded(1)).unwrap().is_empty());
    }
}
