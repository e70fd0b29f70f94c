//! Resource management
//!
//! GPU-side shader programs, textures, samplers and meshes, the materials
//! that combine them, and the registry that owns them by name.

mod material;
mod mesh;
mod registry;
mod shader;
mod texture;

pub use material::*;
pub use mesh::*;
pub use registry::*;
pub use shader::*;
pub use texture::*;
