//! Core types shared by the galaxy generator and viewer.
//!
//! This crate provides the foundational types used across all crates:
//! - Linear RGB colors parsed from hex strings
//! - Transforms for placing point clouds in the scene
//! - Frame time tracking for the animation loop

pub mod color;
pub mod time;
pub mod transform;

pub use color::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec3};
pub use hecs::{Entity, World};
