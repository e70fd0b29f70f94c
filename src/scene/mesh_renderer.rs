use std::sync::Arc;

use bevy_ecs::prelude::*;
use serde_json::Value;

use crate::json::read_str;
use crate::resources::{AssetRegistry, Material, Mesh};

/// Draws a registry mesh with a registry material at the entity's transform
#[derive(Component, Debug, Clone)]
pub struct MeshRenderer {
    pub mesh: Arc<Mesh>,
    pub material: Arc<Material>,
}

impl MeshRenderer {
    pub fn new(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self { mesh, material }
    }

    /// Resolve the `mesh` and `material` names of a record
    ///
    /// Returns `None` if either name is missing from the registry.
    pub fn from_json(data: &Value, assets: &AssetRegistry) -> Option<Self> {
        let mesh = assets.mesh(read_str(data, "mesh").unwrap_or(""))?;
        let material = assets.material(read_str(data, "material").unwrap_or(""))?;
        Some(Self { mesh, material })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingContext;
    use crate::resources::{MaterialKind, MeshData};
    use glam::UVec2;
    use serde_json::json;

    fn registry() -> AssetRegistry {
        let mut ctx = RecordingContext::new();
        let mut assets = AssetRegistry::new();
        assets.insert_mesh(
            "ball",
            Mesh::create(&mut ctx, &MeshData::sphere(UVec2::new(4, 2))).unwrap(),
        );
        assets.insert_material("red", Material::new(MaterialKind::Tinted));
        assets
    }

    #[test]
    fn resolves_registered_names() {
        let assets = registry();
        let renderer =
            MeshRenderer::from_json(&json!({ "mesh": "ball", "material": "red" }), &assets)
                .unwrap();
        assert!(Arc::ptr_eq(&renderer.mesh, &assets.mesh("ball").unwrap()));
        assert!(Arc::ptr_eq(&renderer.material, &assets.material("red").unwrap()));
    }

    #[test]
    fn missing_names_resolve_to_none() {
        let assets = registry();
        assert!(MeshRenderer::from_json(&json!({ "mesh": "cube", "material": "red" }), &assets)
            .is_none());
        assert!(MeshRenderer::from_json(&json!({ "mesh": "ball" }), &assets).is_none());
    }
}
