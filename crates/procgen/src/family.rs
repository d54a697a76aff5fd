//! The three particle families and generator dispatch.

use crate::buffer::PointBuffer;
use crate::burst::Burst;
use crate::core_cluster::CoreCluster;
use crate::error::GenerationError;
use crate::params::GalaxyParameters;
use crate::random::RandomSource;
use crate::spiral::SpiralDisk;

/// A family of particles that is generated and replaced as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Spiral,
    Burst,
    Core,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Spiral, Family::Burst, Family::Core];

    /// Stable scene name for the family's point cloud.
    pub fn name(self) -> &'static str {
        match self {
            Family::Spiral => "galaxy",
            Family::Burst => "galaxyBurst",
            Family::Core => "galaxyCore",
        }
    }

    /// Panel folder title.
    pub fn label(self) -> &'static str {
        match self {
            Family::Spiral => "Galaxy",
            Family::Burst => "Burst",
            Family::Core => "Core",
        }
    }

    /// Requested point count for this family under `params`.
    pub fn point_count(self, params: &GalaxyParameters) -> usize {
        match self {
            Family::Spiral => params.spiral.count,
            Family::Burst => params.burst.point_count(params.spiral.count),
            Family::Core => params.core.particles,
        }
    }

    /// Run this family's generator against the full parameter set.
    pub fn generate<R: RandomSource + ?Sized>(
        self,
        params: &GalaxyParameters,
        rng: &mut R,
    ) -> Result<PointBuffer, GenerationError> {
        match self {
            Family::Spiral => SpiralDisk::generate(&params.spiral, rng),
            Family::Burst => Burst::generate(&params.burst, params.spiral.count, rng),
            Family::Core => CoreCluster::generate(&params.core, rng),
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
