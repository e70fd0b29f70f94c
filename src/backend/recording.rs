//! Recording rendering context for tests and headless runs.
//!
//! This context doesn't talk to a GPU. It hands out fresh handles, tracks
//! which resources are alive, and records every call in order so the exact
//! sequence of state changes, uniform writes and draws can be inspected.

use std::collections::HashSet;

use glam::Vec4;

use crate::backend::traits::*;
use crate::backend::types::*;
use crate::pipeline::PipelineState;
use crate::resources::MeshData;

/// Kind of GPU object tracked by the recording context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ShaderProgram,
    Texture,
    Sampler,
    Mesh,
    Framebuffer,
    VertexArray,
}

/// A single recorded GPU call
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    Create { kind: ResourceKind, id: u64, label: String },
    Destroy { kind: ResourceKind, id: u64 },
    ApplyPipelineState(PipelineState),
    SetViewport { x: i32, y: i32, width: u32, height: u32 },
    SetClearColor(Vec4),
    SetClearDepth(f32),
    SetColorMask([bool; 4]),
    SetDepthMask(bool),
    BindFramebuffer(Option<FramebufferHandle>),
    Clear(ClearFlags),
    UseProgram(ProgramHandle),
    SetUniform { program: ProgramHandle, name: String, value: UniformValue },
    ActiveTexture(u32),
    BindTexture(TextureHandle),
    BindSampler { unit: u32, sampler: SamplerHandle },
    DrawMesh(MeshHandle),
    BindVertexArray(VertexArrayHandle),
    DrawArrays { first: u32, count: u32 },
}

impl GpuCommand {
    /// Whether this command produces fragments
    pub fn is_draw(&self) -> bool {
        matches!(self, GpuCommand::DrawMesh(_) | GpuCommand::DrawArrays { .. })
    }
}

/// Rendering context that records calls instead of executing them
#[derive(Debug)]
pub struct RecordingContext {
    next_id: u64,
    commands: Vec<GpuCommand>,
    live: HashSet<(ResourceKind, u64)>,
    framebuffer_status: FramebufferStatus,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            commands: Vec::new(),
            live: HashSet::new(),
            framebuffer_status: FramebufferStatus::Complete,
        }
    }

    /// Status reported for every framebuffer created from now on
    pub fn set_framebuffer_status(&mut self, status: FramebufferStatus) {
        self.framebuffer_status = status;
    }

    pub fn commands(&self) -> &[GpuCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take_commands(&mut self) -> Vec<GpuCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of draw calls recorded so far
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// Number of resources created and not yet destroyed
    pub fn live_resource_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_resources_of(&self, kind: ResourceKind) -> usize {
        self.live.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Uniform writes in order, as (name, value) pairs
    pub fn uniform_writes(&self) -> Vec<(&str, UniformValue)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                GpuCommand::SetUniform { name, value, .. } => Some((name.as_str(), *value)),
                _ => None,
            })
            .collect()
    }

    /// Last value written to the named uniform, if any
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|c| match c {
            GpuCommand::SetUniform { name: n, value, .. } if n == name => Some(*value),
            _ => None,
        })
    }

    fn allocate(&mut self, kind: ResourceKind, label: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        log::trace!("RecordingContext: creating {:?} #{} ({})", kind, id, label);
        self.live.insert((kind, id));
        self.commands.push(GpuCommand::Create {
            kind,
            id,
            label: label.to_string(),
        });
        id
    }

    fn release(&mut self, kind: ResourceKind, id: u64) {
        if !self.live.remove(&(kind, id)) {
            log::warn!("RecordingContext: {:?} #{} destroyed while not alive", kind, id);
        }
        log::trace!("RecordingContext: destroying {:?} #{}", kind, id);
        self.commands.push(GpuCommand::Destroy { kind, id });
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext for RecordingContext {
    fn name(&self) -> &str {
        "Recording"
    }

    fn create_shader_program(
        &mut self,
        label: &str,
        stages: &[ShaderSource],
    ) -> RenderResult<ProgramHandle> {
        if stages.is_empty() {
            return Err(RenderError::ShaderCreationFailed(format!(
                "program '{label}' has no stages"
            )));
        }
        Ok(ProgramHandle(self.allocate(ResourceKind::ShaderProgram, label)))
    }

    fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        data: Option<&[u8]>,
    ) -> RenderResult<TextureHandle> {
        if let Some(data) = data {
            let expected = (desc.width * desc.height * desc.format.bytes_per_pixel()) as usize;
            if data.len() != expected {
                return Err(RenderError::TextureCreationFailed(format!(
                    "expected {} bytes of pixel data, got {}",
                    expected,
                    data.len()
                )));
            }
        }
        let label = desc.label.as_deref().unwrap_or("texture");
        Ok(TextureHandle(self.allocate(ResourceKind::Texture, label)))
    }

    fn create_sampler(&mut self, desc: &SamplerDescriptor) -> RenderResult<SamplerHandle> {
        let label = desc.label.as_deref().unwrap_or("sampler");
        Ok(SamplerHandle(self.allocate(ResourceKind::Sampler, label)))
    }

    fn create_mesh(&mut self, data: &MeshData) -> RenderResult<MeshHandle> {
        if data.vertices.is_empty() {
            return Err(RenderError::MeshCreationFailed(format!(
                "mesh '{}' has no vertices",
                data.name
            )));
        }
        Ok(MeshHandle(self.allocate(ResourceKind::Mesh, &data.name)))
    }

    fn create_framebuffer(
        &mut self,
        _color: TextureHandle,
        _depth: TextureHandle,
    ) -> RenderResult<FramebufferHandle> {
        Ok(FramebufferHandle(
            self.allocate(ResourceKind::Framebuffer, "framebuffer"),
        ))
    }

    fn framebuffer_status(&self, _framebuffer: FramebufferHandle) -> FramebufferStatus {
        self.framebuffer_status
    }

    fn create_vertex_array(&mut self) -> RenderResult<VertexArrayHandle> {
        Ok(VertexArrayHandle(
            self.allocate(ResourceKind::VertexArray, "vertex array"),
        ))
    }

    fn destroy_shader_program(&mut self, program: ProgramHandle) {
        self.release(ResourceKind::ShaderProgram, program.0);
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.release(ResourceKind::Texture, texture.0);
    }

    fn destroy_sampler(&mut self, sampler: SamplerHandle) {
        self.release(ResourceKind::Sampler, sampler.0);
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) {
        self.release(ResourceKind::Mesh, mesh.0);
    }

    fn destroy_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        self.release(ResourceKind::Framebuffer, framebuffer.0);
    }

    fn destroy_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.release(ResourceKind::VertexArray, vertex_array.0);
    }

    fn apply_pipeline_state(&mut self, state: &PipelineState) {
        self.commands.push(GpuCommand::ApplyPipelineState(*state));
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.commands.push(GpuCommand::SetViewport {
            x,
            y,
            width,
            height,
        });
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.commands.push(GpuCommand::SetClearColor(color));
    }

    fn set_clear_depth(&mut self, depth: f32) {
        self.commands.push(GpuCommand::SetClearDepth(depth));
    }

    fn set_color_mask(&mut self, mask: [bool; 4]) {
        self.commands.push(GpuCommand::SetColorMask(mask));
    }

    fn set_depth_mask(&mut self, enabled: bool) {
        self.commands.push(GpuCommand::SetDepthMask(enabled));
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) {
        self.commands.push(GpuCommand::BindFramebuffer(framebuffer));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.commands.push(GpuCommand::Clear(flags));
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.commands.push(GpuCommand::UseProgram(program));
    }

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        self.commands.push(GpuCommand::SetUniform {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn active_texture(&mut self, unit: u32) {
        self.commands.push(GpuCommand::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.commands.push(GpuCommand::BindTexture(texture));
    }

    fn bind_sampler(&mut self, unit: u32, sampler: SamplerHandle) {
        self.commands.push(GpuCommand::BindSampler { unit, sampler });
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        self.commands.push(GpuCommand::DrawMesh(mesh));
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.commands.push(GpuCommand::BindVertexArray(vertex_array));
    }

    fn draw_arrays(&mut self, first: u32, count: u32) {
        self.commands.push(GpuCommand::DrawArrays { first, count });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_tracked() {
        let mut ctx = RecordingContext::new();
        let a = ctx.create_sampler(&SamplerDescriptor::default()).unwrap();
        let b = ctx.create_sampler(&SamplerDescriptor::default()).unwrap();
        assert_ne!(a, b);
        assert_eq!(ctx.live_resources_of(ResourceKind::Sampler), 2);

        ctx.destroy_sampler(a);
        assert_eq!(ctx.live_resource_count(), 1);
    }

    #[test]
    fn texture_data_size_is_validated() {
        let mut ctx = RecordingContext::new();
        let desc = TextureDescriptor {
            width: 2,
            height: 2,
            ..Default::default()
        };
        assert!(ctx.create_texture(&desc, Some(&[0u8; 16])).is_ok());
        assert!(matches!(
            ctx.create_texture(&desc, Some(&[0u8; 3])),
            Err(RenderError::TextureCreationFailed(_))
        ));
    }

    #[test]
    fn last_uniform_returns_latest_write() {
        let mut ctx = RecordingContext::new();
        let program = ctx
            .create_shader_program("test", &[ShaderSource::vertex("a.vert")])
            .unwrap();
        ctx.set_uniform(program, "tint", UniformValue::Float(1.0));
        ctx.set_uniform(program, "tint", UniformValue::Float(2.0));
        assert_eq!(ctx.last_uniform("tint"), Some(UniformValue::Float(2.0)));
        assert_eq!(ctx.uniform_writes().len(), 2);
        assert_eq!(ctx.last_uniform("missing"), None);
    }
}
