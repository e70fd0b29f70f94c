//! Name-keyed shared resources
//!
//! Scene files refer to shaders, textures, samplers, meshes and materials by
//! name. The registry owns them for the lifetime of a scene; materials and
//! mesh renderers hold shared references into it.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::{Material, Mesh, Sampler, ShaderProgram, Texture2D};
use crate::backend::RenderContext;

#[derive(Debug, Default)]
pub struct AssetRegistry {
    shaders: HashMap<String, Arc<ShaderProgram>>,
    textures: HashMap<String, Arc<Texture2D>>,
    samplers: HashMap<String, Arc<Sampler>>,
    meshes: HashMap<String, Arc<Mesh>>,
    materials: HashMap<String, Arc<Material>>,
}

fn lookup<T>(map: &HashMap<String, Arc<T>>, kind: &str, name: &str) -> Option<Arc<T>> {
    // An empty name is a request for "no resource"
    if name.is_empty() {
        return None;
    }
    let found = map.get(name).cloned();
    if found.is_none() {
        log::warn!("No {} named '{}' in the asset registry", kind, name);
    }
    found
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shader(&self, name: &str) -> Option<Arc<ShaderProgram>> {
        lookup(&self.shaders, "shader", name)
    }

    pub fn texture(&self, name: &str) -> Option<Arc<Texture2D>> {
        lookup(&self.textures, "texture", name)
    }

    pub fn sampler(&self, name: &str) -> Option<Arc<Sampler>> {
        lookup(&self.samplers, "sampler", name)
    }

    pub fn mesh(&self, name: &str) -> Option<Arc<Mesh>> {
        lookup(&self.meshes, "mesh", name)
    }

    pub fn material(&self, name: &str) -> Option<Arc<Material>> {
        lookup(&self.materials, "material", name)
    }

    pub fn insert_shader(&mut self, name: &str, shader: ShaderProgram) -> Arc<ShaderProgram> {
        let shader = Arc::new(shader);
        self.shaders.insert(name.to_string(), shader.clone());
        shader
    }

    pub fn insert_texture(&mut self, name: &str, texture: Texture2D) -> Arc<Texture2D> {
        let texture = Arc::new(texture);
        self.textures.insert(name.to_string(), texture.clone());
        texture
    }

    pub fn insert_sampler(&mut self, name: &str, sampler: Sampler) -> Arc<Sampler> {
        let sampler = Arc::new(sampler);
        self.samplers.insert(name.to_string(), sampler.clone());
        sampler
    }

    pub fn insert_mesh(&mut self, name: &str, mesh: Mesh) -> Arc<Mesh> {
        let mesh = Arc::new(mesh);
        self.meshes.insert(name.to_string(), mesh.clone());
        mesh
    }

    pub fn insert_material(&mut self, name: &str, material: Material) -> Arc<Material> {
        let material = Arc::new(material);
        self.materials.insert(name.to_string(), material.clone());
        material
    }

    /// Build every material of a `{ name: record }` object
    ///
    /// Shaders, textures and samplers must already be registered.
    pub fn deserialize_materials(&mut self, data: &Value) {
        let Some(records) = data.as_object() else {
            log::debug!("Ignoring non-object materials record");
            return;
        };
        for (name, record) in records {
            let material = Material::from_json(record, self);
            self.insert_material(name, material);
        }
    }

    /// Release every GPU object the registry owns
    pub fn clear<C: RenderContext + ?Sized>(&mut self, ctx: &mut C) {
        self.materials.clear();
        for (_, mesh) in self.meshes.drain() {
            mesh.destroy(ctx);
        }
        for (_, sampler) in self.samplers.drain() {
            sampler.destroy(ctx);
        }
        for (_, texture) in self.textures.drain() {
            texture.destroy(ctx);
        }
        for (_, shader) in self.shaders.drain() {
            shader.destroy(ctx);
        }
    }
}
