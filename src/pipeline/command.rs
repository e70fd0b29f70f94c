//! Per-frame draw records

use std::cmp::Ordering;
use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::resources::{Material, Mesh};

/// One mesh drawn with one material at one world transform
///
/// Rebuilt every frame from the scene's mesh renderers.
#[derive(Debug, Clone)]
pub struct RenderCommand {
    pub local_to_world: Mat4,
    /// World-space position of the object origin
    pub center: Vec3,
    pub mesh: Arc<Mesh>,
    pub material: Arc<Material>,
}

impl RenderCommand {
    pub fn new(local_to_world: Mat4, mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self {
            local_to_world,
            center: local_to_world.transform_point3(Vec3::ZERO),
            mesh,
            material,
        }
    }

    /// Distance along the camera's forward axis
    pub fn depth_along(&self, camera_forward: Vec3) -> f32 {
        self.center.dot(camera_forward)
    }
}

/// Order commands far to near along `camera_forward`
pub fn sort_back_to_front(commands: &mut [RenderCommand], camera_forward: Vec3) {
    commands.sort_by(|a, b| {
        b.depth_along(camera_forward)
            .partial_cmp(&a.depth_along(camera_forward))
            .unwrap_or(Ordering::Equal)
    });
}
