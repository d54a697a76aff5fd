//! Procedural generation of the galaxy's particle families.
//!
//! Each generator turns a parameter block plus a [`RandomSource`] into a
//! [`PointBuffer`]. Generators never touch the scene; the caller decides what
//! to do with the result.

pub mod buffer;
pub mod burst;
pub mod controls;
pub mod core_cluster;
pub mod error;
pub mod family;
pub mod params;
pub mod random;
pub mod spiral;

pub use buffer::*;
pub use burst::*;
pub use controls::*;
pub use core_cluster::*;
pub use error::*;
pub use family::*;
pub use params::*;
pub use random::*;
pub use spiral::*;
