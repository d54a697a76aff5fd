//! Burst: a vertical jet symmetric about the disk plane.

use crate::buffer::PointBuffer;
use crate::error::GenerationError;
use crate::params::{BurstParams, BurstSpread};
use crate::random::RandomSource;
use crate::spiral::jitter;

/// Burst/jet generator.
pub struct Burst;

impl Burst {
    /// Generate the burst. `spiral_count` feeds `BurstSizing::Derived`.
    pub fn generate<R: RandomSource + ?Sized>(
        params: &BurstParams,
        spiral_count: usize,
        rng: &mut R,
    ) -> Result<PointBuffer, GenerationError> {
        params.validate()?;

        let count = params.point_count(spiral_count);
        let extent = params.extent_length();
        let width = params.spread_width();
        let mut buffer = PointBuffer::with_colors(count);

        for _ in 0..count {
            let height = rng.up_to(extent);
            let direction = rng.sign();

            let (x, z) = match params.spread {
                BurstSpread::Clustered => (
                    jitter(rng, params.randomness_power, width),
                    jitter(rng, params.randomness_power, width),
                ),
                BurstSpread::Flat => ((rng.next() - 0.5) * width, (rng.next() - 0.5) * width),
            };

            let t = if extent > 0.0 { height / extent } else { 0.0 };
            let color = params.inside_color.lerp(&params.outside_color, t);

            buffer.push_colored([x, height * direction, z], color.to_array());
        }

        log::debug!("burst: {} points ({:?}, {:?})", buffer.len(), params.sizing, params.spread);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BurstExtent, BurstSizing};
    use crate::random::{ConstantSource, RandSource, SequenceSource};

    #[test]
    fn zero_count_is_empty_and_valid() {
        let params = BurstParams { particles_count: 0, ..Default::default() };
        let buffer = Burst::generate(&params, 100_000, &mut RandSource::seeded(1)).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.flat_colors().map(|c| c.len()), Some(0));
    }

    #[test]
    fn fixed_and_derived_lengths() {
        let mut rng = RandSource::seeded(2);
        let fixed = BurstParams { particles_count: 321, ..Default::default() };
        assert_eq!(Burst::generate(&fixed, 10, &mut rng).unwrap().flat_positions().len(), 321 * 3);

        let derived = BurstParams {
            sizing: BurstSizing::Derived { divisor: 4 },
            ..Default::default()
        };
        assert_eq!(Burst::generate(&derived, 1_001, &mut rng).unwrap().len(), 250);
        assert!(Burst::generate(&derived, 3, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn beam_is_symmetric_and_bounded() {
        let params = BurstParams { particles_count: 4_000, ..Default::default() };
        let buffer = Burst::generate(&params, 0, &mut RandSource::seeded(3)).unwrap();
        let width = params.spread_width();
        let (mut up, mut down) = (0, 0);
        for p in &buffer.positions {
            assert!(p[1].abs() <= params.height);
            assert!(p[0].abs() <= width && p[2].abs() <= width, "{p:?} outside beam");
            if p[1] >= 0.0 { up += 1 } else { down += 1 }
        }
        assert!(up > 1_500 && down > 1_500, "up {up} down {down}");
    }

    #[test]
    fn flat_spread_stays_within_half_width() {
        let params = BurstParams {
            particles_count: 2_000,
            spread: BurstSpread::Flat,
            ..Default::default()
        };
        let buffer = Burst::generate(&params, 0, &mut RandSource::seeded(4)).unwrap();
        let half = params.spread_width() * 0.5;
        assert!(buffer.positions.iter().all(|p| p[0].abs() <= half && p[2].abs() <= half));
    }

    #[test]
    fn color_follows_height() {
        let params = BurstParams { particles_count: 1, ..Default::default() };
        // height draw 0.0 => base of the beam
        let base = Burst::generate(&params, 0, &mut ConstantSource(0.0)).unwrap();
        assert_eq!(base.colors.unwrap()[0], params.inside_color.to_array());

        // height draw 0.5 on a radius-extent beam: halfway up the radius
        let radial = BurstParams { extent: BurstExtent::Radius, ..params.clone() };
        let mut draws = SequenceSource::new(vec![0.5, 0.9, 0.1, 0.1, 0.1, 0.1]);
        let mid = Burst::generate(&radial, 0, &mut draws).unwrap();
        assert!((mid.positions[0][1] + radial.radius * 0.5).abs() < 1e-6, "{:?}", mid.positions);
        let expected = params.inside_color.lerp(&params.outside_color, 0.5).to_array();
        assert_eq!(mid.colors.unwrap()[0], expected);
    }

    #[test]
    fn same_seed_same_buffer() {
        let params = BurstParams { particles_count: 1_000, ..Default::default() };
        let a = Burst::generate(&params, 0, &mut RandSource::seeded(11)).unwrap();
        let b = Burst::generate(&params, 0, &mut RandSource::seeded(11)).unwrap();
        assert_eq!(a, b);
    }
}
