//! Core rendering context abstraction
//!
//! [`RenderContext`] is the GPU binding surface the renderer drives. The
//! context owns all mutable GPU state (bound program, active texture unit,
//! bound framebuffer, fixed-function state), so every call site takes it by
//! `&mut` and two renders can never interleave on the same context.

use crate::backend::types::*;
use crate::pipeline::PipelineState;
use crate::resources::MeshData;
use glam::Vec4;
use thiserror::Error;

/// Renderer error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Failed to create shader program: {0}")]
    ShaderCreationFailed(String),
    #[error("Failed to create texture: {0}")]
    TextureCreationFailed(String),
    #[error("Failed to load texture '{path}': {reason}")]
    TextureLoadFailed { path: String, reason: String },
    #[error("Failed to create sampler: {0}")]
    SamplerCreationFailed(String),
    #[error("Failed to create mesh: {0}")]
    MeshCreationFailed(String),
    #[error("Framebuffer is not complete: {0}")]
    FramebufferIncomplete(FramebufferStatus),
    #[error("Failed to create resource: {0}")]
    ResourceCreationFailed(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub(crate) u64);

/// Handle to a GPU texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u64);

/// Handle to a sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub(crate) u64);

/// Handle to an uploaded mesh (vertex array plus its buffers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) u64);

/// Handle to a framebuffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub(crate) u64);

/// Handle to an empty vertex array used for attribute-less draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub(crate) u64);

/// GPU binding surface used by materials, passes and the forward renderer
pub trait RenderContext {
    /// Get the context name for debugging
    fn name(&self) -> &str;

    // Resource creation

    /// Compile and link a program from the given stages
    fn create_shader_program(
        &mut self,
        label: &str,
        stages: &[ShaderSource],
    ) -> RenderResult<ProgramHandle>;

    /// Create a texture, optionally filled with tightly packed pixel data
    fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        data: Option<&[u8]>,
    ) -> RenderResult<TextureHandle>;

    /// Create a sampler
    fn create_sampler(&mut self, desc: &SamplerDescriptor) -> RenderResult<SamplerHandle>;

    /// Upload mesh vertex and index data
    fn create_mesh(&mut self, data: &MeshData) -> RenderResult<MeshHandle>;

    /// Create a framebuffer with one color and one depth attachment
    fn create_framebuffer(
        &mut self,
        color: TextureHandle,
        depth: TextureHandle,
    ) -> RenderResult<FramebufferHandle>;

    /// Check whether a framebuffer can be rendered to
    fn framebuffer_status(&self, framebuffer: FramebufferHandle) -> FramebufferStatus;

    /// Create an empty vertex array
    fn create_vertex_array(&mut self) -> RenderResult<VertexArrayHandle>;

    // Resource cleanup

    fn destroy_shader_program(&mut self, program: ProgramHandle);

    fn destroy_texture(&mut self, texture: TextureHandle);

    fn destroy_sampler(&mut self, sampler: SamplerHandle);

    fn destroy_mesh(&mut self, mesh: MeshHandle);

    fn destroy_framebuffer(&mut self, framebuffer: FramebufferHandle);

    fn destroy_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    // Fixed-function state

    /// Apply depth, culling, blending and write-mask state in one step
    fn apply_pipeline_state(&mut self, state: &PipelineState);

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    fn set_clear_color(&mut self, color: Vec4);

    fn set_clear_depth(&mut self, depth: f32);

    fn set_color_mask(&mut self, mask: [bool; 4]);

    fn set_depth_mask(&mut self, enabled: bool);

    /// Bind a draw framebuffer, `None` selects the default target
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>);

    fn clear(&mut self, flags: ClearFlags);

    // Programs and bindings

    fn use_program(&mut self, program: ProgramHandle);

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue);

    fn active_texture(&mut self, unit: u32);

    /// Bind a 2D texture to the active texture unit
    fn bind_texture(&mut self, texture: TextureHandle);

    fn bind_sampler(&mut self, unit: u32, sampler: SamplerHandle);

    // Draw calls

    /// Draw all indexed triangles of a mesh
    fn draw_mesh(&mut self, mesh: MeshHandle);

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Draw non-indexed triangles from the bound vertex array
    fn draw_arrays(&mut self, first: u32, count: u32);
}
