//! Post-process pass
//!
//! The scene is drawn into an offscreen framebuffer, then composited to the
//! default target with a full-screen triangle sampling the color attachment.

use std::sync::Arc;

use glam::UVec2;

use super::unwind::{Created, Unwind};
use crate::backend::{
    AddressMode, FilterMode, FramebufferHandle, FramebufferStatus, RenderContext, RenderError,
    RenderResult, SamplerDescriptor, ShaderSource, TextureFormat, VertexArrayHandle,
};
use crate::config::RendererConfig;
use crate::resources::{Material, MaterialKind, Sampler, ShaderProgram, Texture2D, TextureBlock};

#[derive(Debug)]
pub struct PostProcessPass {
    framebuffer: FramebufferHandle,
    vertex_array: VertexArrayHandle,
    color_target: Arc<Texture2D>,
    depth_target: Texture2D,
    sampler: Arc<Sampler>,
    shader: Arc<ShaderProgram>,
    material: Material,
}

impl PostProcessPass {
    /// Allocate window-sized targets and the composite material
    ///
    /// Fails with [`RenderError::FramebufferIncomplete`] if the targets
    /// cannot be rendered to. On failure every object created so far is
    /// destroyed.
    pub fn create<C: RenderContext + ?Sized>(
        ctx: &mut C,
        config: &RendererConfig,
        fragment_shader: &str,
        size: UVec2,
    ) -> RenderResult<Self> {
        let mut created = Unwind::default();
        Self::build(ctx, config, fragment_shader, size, &mut created).inspect_err(|err| {
            log::error!("Failed to build post-process pass: {}", err);
            created.release(ctx);
        })
    }

    fn build<C: RenderContext + ?Sized>(
        ctx: &mut C,
        config: &RendererConfig,
        fragment_shader: &str,
        size: UVec2,
        created: &mut Unwind,
    ) -> RenderResult<Self> {
        let color_target = Arc::new(Texture2D::empty(
            ctx,
            "postprocess color",
            TextureFormat::Rgba8Unorm,
            size,
        )?);
        created.push(Created::Texture(color_target.handle()));

        let depth_target = Texture2D::empty(ctx, "postprocess depth", TextureFormat::Depth24, size)?;
        created.push(Created::Texture(depth_target.handle()));

        let framebuffer = ctx.create_framebuffer(color_target.handle(), depth_target.handle())?;
        created.push(Created::Framebuffer(framebuffer));

        let status = ctx.framebuffer_status(framebuffer);
        if status != FramebufferStatus::Complete {
            return Err(RenderError::FramebufferIncomplete(status));
        }

        let vertex_array = ctx.create_vertex_array()?;
        created.push(Created::VertexArray(vertex_array));

        let sampler = Arc::new(Sampler::create(
            ctx,
            SamplerDescriptor {
                label: Some("postprocess".into()),
                mag_filter: FilterMode::Linear,
                min_filter: FilterMode::Linear,
                address_mode_u: AddressMode::ClampToEdge,
                address_mode_v: AddressMode::ClampToEdge,
            },
        )?);
        created.push(Created::Sampler(sampler.handle()));

        let shader = Arc::new(ShaderProgram::create(
            ctx,
            "postprocess",
            &[
                ShaderSource::vertex(config.fullscreen_vertex_shader.as_str()),
                ShaderSource::fragment(fragment_shader),
            ],
        )?);

        let mut material = Material::new(MaterialKind::Textured);
        material.shader = Some(shader.clone());
        material.pipeline_state.depth_mask = false;
        material.texture = Some(TextureBlock {
            texture: Some(color_target.clone()),
            sampler: Some(sampler.clone()),
            alpha_threshold: 0.0,
        });

        Ok(Self {
            framebuffer,
            vertex_array,
            color_target,
            depth_target,
            sampler,
            shader,
            material,
        })
    }

    pub fn framebuffer(&self) -> FramebufferHandle {
        self.framebuffer
    }

    pub fn color_target(&self) -> &Texture2D {
        &self.color_target
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Redirect drawing into the offscreen targets
    pub fn begin<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.bind_framebuffer(Some(self.framebuffer));
    }

    /// Draw the offscreen color onto the default target
    pub fn composite<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.bind_framebuffer(None);
        if self.material.setup(ctx).is_none() {
            return;
        }
        ctx.bind_vertex_array(self.vertex_array);
        ctx.draw_arrays(0, 3);
    }

    /// Destroy every GPU object of the pass
    pub fn release<C: RenderContext + ?Sized>(self, ctx: &mut C) {
        ctx.destroy_framebuffer(self.framebuffer);
        ctx.destroy_vertex_array(self.vertex_array);
        self.color_target.destroy(ctx);
        self.depth_target.destroy(ctx);
        self.sampler.destroy(ctx);
        self.shader.destroy(ctx);
    }
}
