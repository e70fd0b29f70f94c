//! Forward Renderer - the rendering core of a small ECS-based 3D game
//!
//! Every frame the [`ForwardRenderer`] walks a `bevy_ecs` world, collects the
//! camera, lights and mesh renderers, and issues draw calls in a fixed order:
//! opaque geometry, an optional sky sphere, transparent geometry sorted far to
//! near, and an optional full-screen post-process composite.
//!
//! All GPU work goes through a [`RenderContext`] passed by mutable reference.
//! [`RecordingContext`] is a headless implementation that records every call,
//! which is what the tests inspect.
//!
//! # Features
//! - Materials composed from lighting, tint and texture blocks
//! - Directional, point and spot lights
//! - Scene records read from JSON in the game's scene-file format

pub mod backend;
pub mod config;
mod json;
pub mod pipeline;
pub mod resources;
pub mod scene;

// Re-export Bevy ECS prelude for users
pub use bevy_ecs::prelude::*;

pub use backend::{RecordingContext, RenderContext, RenderError, RenderResult};
pub use config::RendererConfig;
pub use pipeline::ForwardRenderer;

/// Install `env_logger`, honoring `RUST_LOG` and defaulting to `info`
///
/// Does nothing if a logger is already installed.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
