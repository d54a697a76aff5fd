//! Parameter records for the three galaxy families and the policies that
//! select between the two generator variants.

use engine_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::{check_at_least, check_finite, check_positive, GenerationError};

/// How spiral jitter scales with distance from the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JitterScaling {
    /// Jitter grows with the sampled radius: outer points spread more.
    #[default]
    Radius,
    /// Jitter amplitude is the same everywhere on the disk.
    Unscaled,
}

/// How many points the burst produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BurstSizing {
    /// Exactly `BurstParams::particles_count` points.
    #[default]
    Fixed,
    /// `floor(spiral count / divisor)` points.
    Derived { divisor: usize },
}

/// Horizontal distribution of burst points around the beam axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BurstSpread {
    /// Power-biased toward the axis, occasional wide excursions.
    #[default]
    Clustered,
    /// Uniform across the beam width.
    Flat,
}

/// Which burst dimension sets the beam's half-length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BurstExtent {
    #[default]
    Height,
    Radius,
}

/// Spiral disk parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralParams {
    /// Number of points.
    pub count: usize,
    /// Point size in world units (attenuated by distance).
    pub size: f32,
    /// Disk radius.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: usize,
    /// Extra rotation per unit of radius.
    pub spin: f32,
    /// Jitter amplitude relative to radius.
    pub randomness: f32,
    /// Exponent biasing jitter toward the arm (higher = tighter).
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
    pub jitter: JitterScaling,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 5,
            spin: 1.0,
            randomness: 0.15,
            randomness_power: 5.0,
            inside_color: Color::from_srgb8(0xfa, 0x70, 0x00),
            outside_color: Color::from_srgb8(0x1b, 0x39, 0x84),
            jitter: JitterScaling::Radius,
        }
    }
}

impl SpiralParams {
    pub fn validate(&self) -> Result<(), GenerationError> {
        check_positive("size", self.size)?;
        check_at_least("radius", self.radius, 0.0)?;
        if self.branches == 0 {
            return Err(GenerationError::invalid("branches", "must be at least 1"));
        }
        check_finite("spin", self.spin)?;
        check_at_least("randomness", self.randomness, 0.0)?;
        check_at_least("randomnessPower", self.randomness_power, 0.0)?;
        Ok(())
    }
}

/// Vertical burst/jet parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BurstParams {
    /// Point count under `BurstSizing::Fixed`.
    pub particles_count: usize,
    /// Beam radius; with `spread_factor` sets the horizontal width.
    pub radius: f32,
    /// Beam half-length under `BurstExtent::Height`.
    pub height: f32,
    pub inside_color: Color,
    pub outside_color: Color,
    pub randomness_power: f32,
    pub spread_factor: f32,
    pub sizing: BurstSizing,
    pub spread: BurstSpread,
    pub extent: BurstExtent,
}

impl Default for BurstParams {
    fn default() -> Self {
        Self {
            particles_count: 35_000,
            radius: 6.0,
            height: 10.0,
            inside_color: Color::from_srgb8(0xfa, 0x70, 0x00),
            outside_color: Color::from_srgb8(0x1b, 0x39, 0x84),
            randomness_power: 5.0,
            spread_factor: 0.1,
            sizing: BurstSizing::Fixed,
            spread: BurstSpread::Clustered,
            extent: BurstExtent::Height,
        }
    }
}

impl BurstParams {
    pub fn validate(&self) -> Result<(), GenerationError> {
        check_at_least("burstRadius", self.radius, 0.0)?;
        check_at_least("burstHeight", self.height, 0.0)?;
        check_at_least("burstRandomnessPower", self.randomness_power, 0.0)?;
        check_at_least("burstSpreadFactor", self.spread_factor, 0.0)?;
        if let BurstSizing::Derived { divisor: 0 } = self.sizing {
            return Err(GenerationError::invalid("burstParticlesDivisor", "must be at least 1"));
        }
        Ok(())
    }

    /// Number of points the burst will produce for a spiral of `spiral_count` points.
    pub fn point_count(&self, spiral_count: usize) -> usize {
        match self.sizing {
            BurstSizing::Fixed => self.particles_count,
            BurstSizing::Derived { divisor } => spiral_count / divisor.max(1),
        }
    }

    /// Beam half-length for the configured extent.
    pub fn extent_length(&self) -> f32 {
        match self.extent {
            BurstExtent::Height => self.height,
            BurstExtent::Radius => self.radius,
        }
    }

    /// Horizontal beam width.
    pub fn spread_width(&self) -> f32 {
        self.radius * self.spread_factor
    }
}

/// Core cluster parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreParams {
    pub particles: usize,
    pub size: f32,
    pub color: Color,
    /// Display-time uniform scale of the cluster. Not baked into positions.
    pub scale: f32,
}

impl Default for CoreParams {
    fn default() -> Self {
        Self {
            particles: 8_000,
            size: 0.01,
            color: Color::from_srgb8(0xf8, 0xd4, 0xc9),
            scale: 0.9,
        }
    }
}

impl CoreParams {
    pub fn validate(&self) -> Result<(), GenerationError> {
        check_positive("coreSize", self.size)?;
        check_positive("coreScale", self.scale)?;
        Ok(())
    }
}

/// The complete, independently tunable parameter set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalaxyParameters {
    pub spiral: SpiralParams,
    pub burst: BurstParams,
    pub core: CoreParams,
}

/// Variant policies chosen at startup (from config), applied on top of the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantPolicies {
    #[serde(default)]
    pub jitter: JitterScaling,
    #[serde(default)]
    pub burst_sizing: BurstSizing,
    #[serde(default)]
    pub burst_spread: BurstSpread,
    #[serde(default)]
    pub burst_extent: BurstExtent,
}

impl VariantPolicies {
    /// The alternate variant: count-derived, flat, radius-extent burst with unscaled jitter.
    pub fn alternate() -> Self {
        Self {
            jitter: JitterScaling::Unscaled,
            burst_sizing: BurstSizing::Derived { divisor: 3 },
            burst_spread: BurstSpread::Flat,
            burst_extent: BurstExtent::Radius,
        }
    }
}

impl GalaxyParameters {
    /// Default parameters with the given variant policies.
    pub fn with_policies(policies: VariantPolicies) -> Self {
        let mut params = Self::default();
        params.apply_policies(policies);
        params
    }

    pub fn apply_policies(&mut self, policies: VariantPolicies) {
        self.spiral.jitter = policies.jitter;
        self.burst.sizing = policies.burst_sizing;
        self.burst.spread = policies.burst_spread;
        self.burst.extent = policies.burst_extent;
    }
}
