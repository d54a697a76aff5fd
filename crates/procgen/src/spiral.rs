//! Spiral disk: points spread along evenly spaced, spin-twisted arms.
//!
//! Each point picks a radius, is assigned an arm by index (so arms stay evenly
//! populated), is rotated further the farther out it sits, and is then
//! jittered. The jitter magnitude is `u^power` for uniform `u`, which keeps
//! most points close to the arm while still allowing the odd stray.

use std::f32::consts::TAU;

use crate::buffer::PointBuffer;
use crate::error::GenerationError;
use crate::params::{JitterScaling, SpiralParams};
use crate::random::RandomSource;

/// Spiral disk generator.
pub struct SpiralDisk;

impl SpiralDisk {
    /// Generate `params.count` colored points.
    pub fn generate<R: RandomSource + ?Sized>(
        params: &SpiralParams,
        rng: &mut R,
    ) -> Result<PointBuffer, GenerationError> {
        params.validate()?;

        let mut buffer = PointBuffer::with_colors(params.count);
        let branches = params.branches as f32;

        for i in 0..params.count {
            let radius = rng.up_to(params.radius);

            let branch_angle = branch_of(i, params.branches) as f32 / branches * TAU;
            let spin_angle = radius * params.spin;
            let angle = branch_angle + spin_angle;

            let amplitude = match params.jitter {
                JitterScaling::Radius => params.randomness * radius,
                JitterScaling::Unscaled => params.randomness,
            };
            let jitter_x = jitter(rng, params.randomness_power, amplitude);
            let jitter_y = jitter(rng, params.randomness_power, amplitude);
            let jitter_z = jitter(rng, params.randomness_power, amplitude);

            let position = [
                angle.cos() * radius + jitter_x,
                jitter_y,
                angle.sin() * radius + jitter_z,
            ];

            let t = if params.radius > 0.0 { radius / params.radius } else { 0.0 };
            let color = params.inside_color.lerp(&params.outside_color, t);

            buffer.push_colored(position, color.to_array());
        }

        log::debug!(
            "spiral: {} points, {} branches, radius {}",
            buffer.len(),
            params.branches,
            params.radius
        );
        Ok(buffer)
    }
}

/// Arm index a point lands on.
pub fn branch_of(index: usize, branches: usize) -> usize {
    index % branches.max(1)
}

/// Signed, power-biased jitter: magnitude drawn first, then the sign.
pub(crate) fn jitter<R: RandomSource + ?Sized>(rng: &mut R, power: f32, amplitude: f32) -> f32 {
    let magnitude = rng.next().powf(power);
    magnitude * rng.sign() * amplitude
}
