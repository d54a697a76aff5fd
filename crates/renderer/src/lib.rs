//! Point-sprite rendering with wgpu.

pub mod camera;
pub mod material;
pub mod pipeline;
pub mod point_cloud;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use camera::*;
pub use material::*;
pub use pipeline::*;
pub use point_cloud::*;
pub use renderer::*;
pub use texture::*;
pub use vertex::*;
