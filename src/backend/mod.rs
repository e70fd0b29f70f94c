//! Backend abstraction layer
//!
//! Provides the rendering context trait the renderer drives and the types it
//! exchanges with an implementation.

pub mod recording;
pub mod traits;
pub mod types;

pub use recording::*;
pub use traits::*;
pub use types::*;
