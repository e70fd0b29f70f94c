//! Common utilities for renderer integration tests.
//!
//! [`TestScene`] bundles a recording context, an asset registry filled with a
//! few materials, and a world to spawn entities into.

#![allow(dead_code)]

use std::path::PathBuf;

use forward_renderer::backend::{
    GpuCommand, MeshHandle, ProgramHandle, ShaderSource, UniformValue,
};
use forward_renderer::resources::{AssetRegistry, Mesh, MeshData, ShaderProgram};
use forward_renderer::scene::{Camera, Light, MeshRenderer, Transform};
use forward_renderer::{Entity, RecordingContext, World};
use glam::{Mat4, UVec2, Vec3};
use serde_json::json;

pub const WINDOW_SIZE: UVec2 = UVec2::new(800, 600);

// ============================================================================
// Scene Setup
// ============================================================================

pub struct TestScene {
    pub ctx: RecordingContext,
    pub assets: AssetRegistry,
    pub world: World,
}

impl TestScene {
    /// Registry with a `ball` mesh and the materials:
    /// `opaque` (tinted), `lit` (lit), `glass` (transparent tinted),
    /// `broken` (no shader)
    pub fn new() -> Self {
        let mut ctx = RecordingContext::new();
        let mut assets = AssetRegistry::new();

        for name in ["tinted", "lit"] {
            let shader = ShaderProgram::create(
                &mut ctx,
                name,
                &[
                    ShaderSource::vertex(format!("{name}.vert")),
                    ShaderSource::fragment(format!("{name}.frag")),
                ],
            )
            .expect("shader");
            assets.insert_shader(name, shader);
        }
        let ball = Mesh::create(&mut ctx, &MeshData::sphere(UVec2::new(8, 4))).expect("mesh");
        assets.insert_mesh("ball", ball);

        assets.deserialize_materials(&json!({
            "opaque": { "type": "tinted", "shader": "tinted", "tint": [1, 0, 0, 1] },
            "lit": { "type": "lit", "shader": "lit", "shininess": 16 },
            "glass": {
                "type": "tinted",
                "shader": "tinted",
                "transparent": true,
                "pipelineState": { "blending": { "enabled": true } }
            },
            "broken": { "type": "tinted", "shader": "missing" }
        }));

        Self {
            ctx,
            assets,
            world: World::new(),
        }
    }

    pub fn spawn_camera(&mut self, transform: Transform) -> Entity {
        self.world
            .spawn((Camera::perspective(90.0, 0.1, 100.0), transform))
            .id()
    }

    pub fn spawn_mesh(&mut self, material: &str, position: Vec3) -> Entity {
        let renderer = MeshRenderer::new(
            self.assets.mesh("ball").expect("ball mesh"),
            self.assets.material(material).expect("material"),
        );
        self.world
            .spawn((renderer, Transform::from_position(position)))
            .id()
    }

    pub fn spawn_light(&mut self, light: Light, position: Vec3) -> Entity {
        self.world
            .spawn((light, Transform::from_position(position)))
            .id()
    }

    pub fn shader(&self, name: &str) -> ProgramHandle {
        self.assets.shader(name).expect("shader").handle()
    }

    pub fn ball(&self) -> MeshHandle {
        self.assets.mesh("ball").expect("ball mesh").handle()
    }
}

// ============================================================================
// Command Inspection
// ============================================================================

/// Indices of every draw of `mesh`
pub fn draws_of(commands: &[GpuCommand], mesh: MeshHandle) -> Vec<usize> {
    commands
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == GpuCommand::DrawMesh(mesh))
        .map(|(i, _)| i)
        .collect()
}

/// Index of the first command matching `predicate`
pub fn position_of(
    commands: &[GpuCommand],
    predicate: impl Fn(&GpuCommand) -> bool,
) -> Option<usize> {
    commands.iter().position(predicate)
}

/// Every matrix written to `name` by `program`, in order
pub fn matrices_written(
    commands: &[GpuCommand],
    program: ProgramHandle,
    name: &str,
) -> Vec<Mat4> {
    commands
        .iter()
        .filter_map(|c| match c {
            GpuCommand::SetUniform {
                program: p,
                name: n,
                value: UniformValue::Mat4(m),
            } if *p == program && n == name => Some(*m),
            _ => None,
        })
        .collect()
}

/// Write a small sky image and return its path
pub fn write_sky_texture(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "forward_renderer_sky_{}_{}.png",
        tag,
        std::process::id()
    ));
    image::RgbaImage::from_pixel(4, 2, image::Rgba([90, 140, 230, 255]))
        .save(&path)
        .expect("write sky texture");
    path
}
