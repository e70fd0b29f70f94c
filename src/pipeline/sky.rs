//! Sky sphere pass
//!
//! A textured unit sphere centered on the camera, drawn after opaque
//! geometry and forced onto the far plane.

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};

use super::unwind::{Created, Unwind};
use super::PipelineState;
use crate::backend::{
    AddressMode, CompareFunction, CullMode, FilterMode, RenderContext, RenderResult,
    SamplerDescriptor, ShaderSource,
};
use crate::config::RendererConfig;
use crate::resources::{
    Material, MaterialKind, Mesh, MeshData, Sampler, ShaderProgram, Texture2D, TextureBlock,
    TextureData,
};

/// Replaces clip-space z with w so every vertex lands at depth 1
pub const ALWAYS_BEHIND: Mat4 = Mat4::from_cols(
    Vec4::X,
    Vec4::Y,
    Vec4::ZERO,
    Vec4::new(0.0, 0.0, 1.0, 1.0),
);

/// Clip transform for the sky sphere seen from `camera_position`
pub fn sky_transform(view_projection: Mat4, camera_position: Vec3) -> Mat4 {
    ALWAYS_BEHIND * view_projection * Mat4::from_translation(camera_position)
}

/// GPU objects owned by the sky pass
#[derive(Debug)]
pub struct SkyPass {
    shader: Arc<ShaderProgram>,
    texture: Arc<Texture2D>,
    sampler: Arc<Sampler>,
    mesh: Mesh,
    material: Material,
}

impl SkyPass {
    /// Load the configured sky texture and build the pass
    pub fn create<C: RenderContext + ?Sized>(
        ctx: &mut C,
        config: &RendererConfig,
        texture_path: &str,
    ) -> RenderResult<Self> {
        let data = TextureData::from_file(texture_path)?;
        Self::with_texture(ctx, config, &data)
    }

    /// Build the pass around already decoded pixels
    ///
    /// On failure every object created so far is destroyed.
    pub fn with_texture<C: RenderContext + ?Sized>(
        ctx: &mut C,
        config: &RendererConfig,
        data: &TextureData,
    ) -> RenderResult<Self> {
        let mut created = Unwind::default();
        Self::build(ctx, config, data, &mut created).inspect_err(|err| {
            log::error!("Failed to build sky pass: {}", err);
            created.release(ctx);
        })
    }

    fn build<C: RenderContext + ?Sized>(
        ctx: &mut C,
        config: &RendererConfig,
        data: &TextureData,
        created: &mut Unwind,
    ) -> RenderResult<Self> {
        let shader = Arc::new(ShaderProgram::create(
            ctx,
            "sky",
            &[
                ShaderSource::vertex(config.sky_vertex_shader.as_str()),
                ShaderSource::fragment(config.sky_fragment_shader.as_str()),
            ],
        )?);
        created.push(Created::Program(shader.handle()));

        let texture = Arc::new(Texture2D::create(ctx, data, false)?);
        created.push(Created::Texture(texture.handle()));

        let sampler = Arc::new(Sampler::create(
            ctx,
            SamplerDescriptor {
                label: Some("sky".into()),
                mag_filter: FilterMode::Linear,
                min_filter: FilterMode::Linear,
                address_mode_u: AddressMode::Repeat,
                address_mode_v: AddressMode::ClampToEdge,
            },
        )?);
        created.push(Created::Sampler(sampler.handle()));

        let mesh = Mesh::create(ctx, &MeshData::sphere(config.sky_segments()))?;
        created.push(Created::Mesh(mesh.handle()));

        let mut material = Material::new(MaterialKind::Textured);
        material.shader = Some(shader.clone());
        material.pipeline_state = sky_pipeline_state();
        material.texture = Some(TextureBlock {
            texture: Some(texture.clone()),
            sampler: Some(sampler.clone()),
            alpha_threshold: 1.0,
        });

        Ok(Self {
            shader,
            texture,
            sampler,
            mesh,
            material,
        })
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn draw<C: RenderContext + ?Sized>(
        &self,
        ctx: &mut C,
        view_projection: Mat4,
        camera_position: Vec3,
    ) {
        let Some(shader) = self.material.setup(ctx) else {
            return;
        };
        shader.set(ctx, "transform", sky_transform(view_projection, camera_position));
        self.mesh.draw(ctx);
    }

    /// Destroy every GPU object of the pass
    pub fn release<C: RenderContext + ?Sized>(self, ctx: &mut C) {
        self.mesh.destroy(ctx);
        self.sampler.destroy(ctx);
        self.texture.destroy(ctx);
        self.shader.destroy(ctx);
    }
}

/// Inside-out sphere: cull front faces, pass depth at the cleared value
fn sky_pipeline_state() -> PipelineState {
    let mut state = PipelineState::default();
    state.face_culling.enabled = true;
    state.face_culling.culled_face = CullMode::Front;
    state.depth_testing.enabled = true;
    state.depth_testing.function = CompareFunction::LessEqual;
    state
}
