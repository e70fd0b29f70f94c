//! Scene components
//!
//! The renderer reads these from a `bevy_ecs::World` every frame.

mod camera;
mod light;
mod mesh_renderer;
mod transform;

pub use camera::*;
pub use light::*;
pub use mesh_renderer::*;
pub use transform::*;
