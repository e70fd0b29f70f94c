//! Cleanup of partially built passes

use crate::backend::{
    FramebufferHandle, MeshHandle, ProgramHandle, RenderContext, SamplerHandle, TextureHandle,
    VertexArrayHandle,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Created {
    Program(ProgramHandle),
    Texture(TextureHandle),
    Sampler(SamplerHandle),
    Mesh(MeshHandle),
    Framebuffer(FramebufferHandle),
    VertexArray(VertexArrayHandle),
}

/// GPU objects created so far by a pass under construction
#[derive(Debug, Default)]
pub(crate) struct Unwind(Vec<Created>);

impl Unwind {
    pub(crate) fn push(&mut self, created: Created) {
        self.0.push(created);
    }

    /// Destroy everything in reverse creation order
    pub(crate) fn release<C: RenderContext + ?Sized>(self, ctx: &mut C) {
        for created in self.0.into_iter().rev() {
            match created {
                Created::Program(handle) => ctx.destroy_shader_program(handle),
                Created::Texture(handle) => ctx.destroy_texture(handle),
                Created::Sampler(handle) => ctx.destroy_sampler(handle),
                Created::Mesh(handle) => ctx.destroy_mesh(handle),
                Created::Framebuffer(handle) => ctx.destroy_framebuffer(handle),
                Created::VertexArray(handle) => ctx.destroy_vertex_array(handle),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GpuCommand, RecordingContext, ResourceKind, SamplerDescriptor};
    use crate::resources::MeshData;
    use glam::UVec2;

    #[test]
    fn releases_in_reverse_creation_order() {
        let mut ctx = RecordingContext::new();
        let mut created = Unwind::default();
        let sampler = ctx.create_sampler(&SamplerDescriptor::default()).unwrap();
        created.push(Created::Sampler(sampler));
        let mesh = ctx.create_mesh(&MeshData::sphere(UVec2::new(4, 2))).unwrap();
        created.push(Created::Mesh(mesh));
        ctx.clear_commands();

        created.release(&mut ctx);

        assert_eq!(
            ctx.commands(),
            &[
                GpuCommand::Destroy {
                    kind: ResourceKind::Mesh,
                    id: mesh.0
                },
                GpuCommand::Destroy {
                    kind: ResourceKind::Sampler,
                    id: sampler.0
                },
            ]
        );
        assert_eq!(ctx.live_resource_count(), 0);
    }
}
