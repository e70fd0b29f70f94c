//! Forward rendering pipeline
//!
//! [`ForwardRenderer`] turns a scene into draw calls each frame. The sky
//! and post-process passes are optional and owned by the renderer.

mod command;
mod forward_renderer;
mod lights;
mod postprocess;
mod sky;
mod state;
mod unwind;

pub use command::*;
pub use forward_renderer::ForwardRenderer;
pub use lights::*;
pub use postprocess::PostProcessPass;
pub use sky::*;
pub use state::*;
