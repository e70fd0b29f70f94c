//! Materials
//!
//! A [`Material`] is a base record (pipeline state, shader, transparency)
//! plus optional capability blocks. The six material kinds used by scene
//! files are fixed combinations of those blocks:
//!
//! | kind           | lighting | tint | texture |
//! |----------------|----------|------|---------|
//! | `material`     |          |      |         |
//! | `lit`          | x        |      |         |
//! | `tinted`       |          | x    |         |
//! | `textured`     |          | x    | x       |
//! | `lit_tinted`   | x        | x    |         |
//! | `lit_textured` | x        | x    | x       |
//!
//! [`Material::setup`] runs the per-block steps in a fixed order: pipeline
//! state, shader activation, tint, lighting, then texture.

use std::sync::Arc;

use glam::{Vec3, Vec4};
use serde_json::Value;

use super::{AssetRegistry, Sampler, ShaderProgram, Texture2D};
use crate::backend::RenderContext;
use crate::json::{read_bool, read_f32, read_str, read_vec3, read_vec4};
use crate::pipeline::PipelineState;

/// Texture unit every textured material binds to
pub const MATERIAL_TEXTURE_UNIT: u32 = 0;

/// Named capability combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Base,
    Lit,
    Tinted,
    Textured,
    LitTinted,
    LitTextured,
}

impl MaterialKind {
    /// Parse the `type` key of a material record
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "material" | "base" => Some(MaterialKind::Base),
            "lit" => Some(MaterialKind::Lit),
            "tinted" => Some(MaterialKind::Tinted),
            "textured" => Some(MaterialKind::Textured),
            "lit_tinted" => Some(MaterialKind::LitTinted),
            "lit_textured" => Some(MaterialKind::LitTextured),
            _ => None,
        }
    }

    pub fn has_lighting(&self) -> bool {
        matches!(
            self,
            MaterialKind::Lit | MaterialKind::LitTinted | MaterialKind::LitTextured
        )
    }

    pub fn has_tint(&self) -> bool {
        !matches!(self, MaterialKind::Base | MaterialKind::Lit)
    }

    pub fn has_texture(&self) -> bool {
        matches!(self, MaterialKind::Textured | MaterialKind::LitTextured)
    }
}

/// Surface response to scene lights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingBlock {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
    pub shininess: f32,
}

impl Default for LightingBlock {
    fn default() -> Self {
        Self {
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            ambient: Vec3::ONE,
            shininess: 0.1,
        }
    }
}

impl LightingBlock {
    pub fn deserialize(&mut self, data: &Value) {
        let defaults = Self::default();
        self.diffuse = read_vec3(data, "diffuse").unwrap_or(defaults.diffuse);
        self.specular = read_vec3(data, "specular").unwrap_or(defaults.specular);
        self.ambient = read_vec3(data, "ambient").unwrap_or(defaults.ambient);
        self.shininess = read_f32(data, "shininess").unwrap_or(defaults.shininess);
    }

    pub fn upload<C: RenderContext + ?Sized>(&self, ctx: &mut C, shader: &ShaderProgram) {
        shader.set(ctx, "material.diffuse", self.diffuse);
        shader.set(ctx, "material.specular", self.specular);
        shader.set(ctx, "material.ambient", self.ambient);
        shader.set(ctx, "material.shininess", self.shininess);
    }
}

/// Constant RGBA color multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintBlock {
    pub tint: Vec4,
}

impl Default for TintBlock {
    fn default() -> Self {
        Self { tint: Vec4::ONE }
    }
}

impl TintBlock {
    pub fn deserialize(&mut self, data: &Value) {
        self.tint = read_vec4(data, "tint").unwrap_or(Vec4::ONE);
    }

    pub fn upload<C: RenderContext + ?Sized>(&self, ctx: &mut C, shader: &ShaderProgram) {
        shader.set(ctx, "tint", self.tint);
    }
}

/// Sampled color texture with alpha cut-out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureBlock {
    pub texture: Option<Arc<Texture2D>>,
    pub sampler: Option<Arc<Sampler>>,
    pub alpha_threshold: f32,
}

impl TextureBlock {
    pub fn deserialize(&mut self, data: &Value, assets: &AssetRegistry) {
        self.alpha_threshold = read_f32(data, "alphaThreshold").unwrap_or(0.0);
        self.texture = assets.texture(read_str(data, "texture").unwrap_or(""));
        self.sampler = assets.sampler(read_str(data, "sampler").unwrap_or(""));
    }

    /// Upload the threshold and bind texture and sampler to the material unit
    pub fn bind<C: RenderContext + ?Sized>(&self, ctx: &mut C, shader: &ShaderProgram) {
        shader.set(ctx, "alphaThreshold", self.alpha_threshold);
        ctx.active_texture(MATERIAL_TEXTURE_UNIT);
        match &self.texture {
            Some(texture) => texture.bind(ctx),
            None => log::trace!("Material on '{}' has no texture to bind", shader.name()),
        }
        if let Some(sampler) = &self.sampler {
            sampler.bind(ctx, MATERIAL_TEXTURE_UNIT);
        }
        shader.set(ctx, "tex", MATERIAL_TEXTURE_UNIT as i32);
    }
}

/// Everything a drawable needs bound before its draw call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub pipeline_state: PipelineState,
    pub shader: Option<Arc<ShaderProgram>>,
    pub transparent: bool,
    pub lighting: Option<LightingBlock>,
    pub tint: Option<TintBlock>,
    pub texture: Option<TextureBlock>,
}

impl Material {
    /// Create a material of the given kind with every block defaulted
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            lighting: kind.has_lighting().then(LightingBlock::default),
            tint: kind.has_tint().then(TintBlock::default),
            texture: kind.has_texture().then(TextureBlock::default),
            ..Default::default()
        }
    }

    /// Build a material from a record whose `type` key names its kind
    pub fn from_json(data: &Value, assets: &AssetRegistry) -> Self {
        let type_name = read_str(data, "type").unwrap_or("material");
        let kind = MaterialKind::from_name(type_name).unwrap_or_else(|| {
            log::warn!("Unknown material type '{}', using base material", type_name);
            MaterialKind::Base
        });
        let mut material = Self::new(kind);
        material.deserialize(data, assets);
        material
    }

    /// The kind matching the present capability blocks
    pub fn kind(&self) -> MaterialKind {
        match (
            self.lighting.is_some(),
            self.tint.is_some(),
            self.texture.is_some(),
        ) {
            (false, false, false) => MaterialKind::Base,
            (true, false, false) => MaterialKind::Lit,
            (false, true, false) => MaterialKind::Tinted,
            (false, _, true) => MaterialKind::Textured,
            (true, true, false) => MaterialKind::LitTinted,
            (true, _, true) => MaterialKind::LitTextured,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lighting.is_some()
    }

    /// Read base fields, then each present block in setup order
    pub fn deserialize(&mut self, data: &Value, assets: &AssetRegistry) {
        if !data.is_object() {
            return;
        }

        if let Some(state) = data.get("pipelineState") {
            self.pipeline_state = PipelineState::from_json(state);
        }
        self.shader = assets.shader(read_str(data, "shader").unwrap_or(""));
        self.transparent = read_bool(data, "transparent").unwrap_or(false);

        if let Some(tint) = &mut self.tint {
            tint.deserialize(data);
        }
        if let Some(lighting) = &mut self.lighting {
            lighting.deserialize(data);
        }
        if let Some(texture) = &mut self.texture {
            texture.deserialize(data, assets);
        }
    }

    /// Bind this material for drawing and return its active shader
    ///
    /// Returns `None` when the material has no shader; nothing past the
    /// pipeline state is applied in that case.
    pub fn setup<C: RenderContext + ?Sized>(&self, ctx: &mut C) -> Option<&ShaderProgram> {
        self.pipeline_state.setup(ctx);
        let shader = self.shader.as_deref()?;
        shader.use_program(ctx);

        if let Some(tint) = &self.tint {
            tint.upload(ctx, shader);
        }
        if let Some(lighting) = &self.lighting {
            lighting.upload(ctx, shader);
        }
        if let Some(texture) = &self.texture {
            texture.bind(ctx, shader);
        }
        Some(shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{
        GpuCommand, RecordingContext, SamplerDescriptor, ShaderSource, UniformValue,
    };
    use crate::resources::TextureData;
    use rstest::rstest;
    use serde_json::json;

    fn registry(ctx: &mut RecordingContext) -> AssetRegistry {
        let mut assets = AssetRegistry::new();
        let shader = ShaderProgram::create(
            ctx,
            "lit",
            &[ShaderSource::vertex("lit.vert"), ShaderSource::fragment("lit.frag")],
        )
        .unwrap();
        assets.insert_shader("lit", shader);
        let texture =
            Texture2D::create(ctx, &TextureData::solid_color([255; 4], "white"), false).unwrap();
        assets.insert_texture("white", texture);
        let sampler = Sampler::create(ctx, SamplerDescriptor::default()).unwrap();
        assets.insert_sampler("linear", sampler);
        assets
    }

    #[rstest]
    #[case("material", MaterialKind::Base)]
    #[case("lit", MaterialKind::Lit)]
    #[case("tinted", MaterialKind::Tinted)]
    #[case("textured", MaterialKind::Textured)]
    #[case("lit_tinted", MaterialKind::LitTinted)]
    #[case("lit_textured", MaterialKind::LitTextured)]
    fn kind_round_trips_through_blocks(#[case] name: &str, #[case] kind: MaterialKind) {
        assert_eq!(MaterialKind::from_name(name), Some(kind));
        assert_eq!(Material::new(kind).kind(), kind);
    }

    #[test]
    fn blocks_default_independently() {
        let mut ctx = RecordingContext::new();
        let assets = registry(&mut ctx);
        let material = Material::from_json(
            &json!({ "type": "lit_textured", "shader": "lit", "shininess": 32.0 }),
            &assets,
        );

        let lighting = material.lighting.unwrap();
        assert_eq!(lighting.diffuse, Vec3::ONE);
        assert_eq!(lighting.shininess, 32.0);
        assert_eq!(material.tint.unwrap().tint, Vec4::ONE);
        let texture = material.texture.as_ref().unwrap();
        assert_eq!(texture.alpha_threshold, 0.0);
        assert!(texture.texture.is_none());
        assert!(texture.sampler.is_none());
        assert!(!material.transparent);
        assert!(material.shader.is_some());
    }

    #[test]
    fn resolves_named_assets() {
        let mut ctx = RecordingContext::new();
        let assets = registry(&mut ctx);
        let material = Material::from_json(
            &json!({
                "type": "textured",
                "shader": "lit",
                "texture": "white",
                "sampler": "linear",
                "alphaThreshold": 0.3,
                "transparent": true,
                "tint": [1, 0, 0, 0.5],
                "pipelineState": { "blending": { "enabled": true } }
            }),
            &assets,
        );

        let texture = material.texture.as_ref().unwrap();
        assert_eq!(texture.texture.as_deref().map(Texture2D::name), Some("white"));
        assert!(texture.sampler.is_some());
        assert!(material.transparent);
        assert!(material.pipeline_state.blending.enabled);
        assert_eq!(material.tint.unwrap().tint, Vec4::new(1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn unknown_type_falls_back_to_base() {
        let assets = AssetRegistry::new();
        let material = Material::from_json(&json!({ "type": "holographic" }), &assets);
        assert_eq!(material.kind(), MaterialKind::Base);
    }

    #[test]
    fn lit_textured_setup_order() {
        let mut ctx = RecordingContext::new();
        let assets = registry(&mut ctx);
        let material = Material::from_json(
            &json!({
                "type": "lit_textured",
                "shader": "lit",
                "texture": "white",
                "sampler": "linear"
            }),
            &assets,
        );
        ctx.clear_commands();

        let shader = material.setup(&mut ctx).unwrap();
        let program = shader.handle();
        let texture = material.texture.as_ref().unwrap();
        let texture_handle = texture.texture.as_ref().unwrap().handle();
        let sampler_handle = texture.sampler.as_ref().unwrap().handle();

        let uniform = |name: &str, value: UniformValue| GpuCommand::SetUniform {
            program,
            name: name.to_string(),
            value,
        };
        let expected = vec![
            GpuCommand::ApplyPipelineState(material.pipeline_state),
            GpuCommand::UseProgram(program),
            uniform("tint", UniformValue::Vec4(Vec4::ONE)),
            uniform("material.diffuse", UniformValue::Vec3(Vec3::ONE)),
            uniform("material.specular", UniformValue::Vec3(Vec3::ONE)),
            uniform("material.ambient", UniformValue::Vec3(Vec3::ONE)),
            uniform("material.shininess", UniformValue::Float(0.1)),
            uniform("alphaThreshold", UniformValue::Float(0.0)),
            GpuCommand::ActiveTexture(0),
            GpuCommand::BindTexture(texture_handle),
            GpuCommand::BindSampler {
                unit: 0,
                sampler: sampler_handle,
            },
            uniform("tex", UniformValue::Int(0)),
        ];
        assert_eq!(ctx.commands(), expected.as_slice());
    }

    #[test]
    fn setup_without_texture_skips_binds() {
        let mut ctx = RecordingContext::new();
        let assets = registry(&mut ctx);
        let material = Material::from_json(&json!({ "type": "textured", "shader": "lit" }), &assets);
        ctx.clear_commands();

        assert!(material.setup(&mut ctx).is_some());
        assert!(!ctx
            .commands()
            .iter()
            .any(|c| matches!(c, GpuCommand::BindTexture(_) | GpuCommand::BindSampler { .. })));
        assert_eq!(ctx.last_uniform("tex"), Some(UniformValue::Int(0)));
    }

    #[test]
    fn setup_without_shader_only_applies_state() {
        let mut ctx = RecordingContext::new();
        let material = Material::new(MaterialKind::Lit);
        assert!(material.setup(&mut ctx).is_none());
        assert_eq!(
            ctx.commands(),
            &[GpuCommand::ApplyPipelineState(material.pipeline_state)]
        );
    }
}
