//! Transform component

use bevy_ecs::prelude::*;
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde_json::Value;

use crate::json::read_vec3;

/// Local position, rotation and scale relative to the parent entity
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Read `position`, `rotation` (Euler YXZ, degrees) and `scale`
    pub fn deserialize(&mut self, data: &Value) {
        if !data.is_object() {
            return;
        }
        if let Some(position) = read_vec3(data, "position") {
            self.position = position;
        }
        if let Some(rotation) = read_vec3(data, "rotation") {
            self.rotation = Quat::from_euler(
                EulerRot::YXZ,
                rotation.y.to_radians(),
                rotation.x.to_radians(),
                rotation.z.to_radians(),
            );
        }
        if let Some(scale) = read_vec3(data, "scale") {
            self.scale = scale;
        }
    }

    /// Local-to-parent matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Links an entity's transform to another entity's
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

/// Compose transforms from `entity` up through its `Parent` chain
///
/// Entities without a `Transform` contribute identity.
pub fn local_to_world(world: &World, entity: Entity) -> Mat4 {
    let mut matrix = Mat4::IDENTITY;
    let mut current = Some(entity);
    while let Some(e) = current {
        if let Some(transform) = world.get::<Transform>(e) {
            matrix = transform.matrix() * matrix;
        }
        current = world.get::<Parent>(e).map(|parent| parent.0);
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_reads_degrees() {
        let mut transform = Transform::default();
        transform.deserialize(&json!({ "position": [1, 2, 3], "rotation": [0, 90, 0] }));
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        let forward = transform.rotation * -Vec3::Z;
        assert!(forward.abs_diff_eq(-Vec3::X, 1e-5));
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn world_matrix_follows_parent_chain() {
        let mut world = World::new();
        let root = world
            .spawn(Transform::from_position(Vec3::new(10.0, 0.0, 0.0)))
            .id();
        let child = world
            .spawn((Transform::from_position(Vec3::new(0.0, 1.0, 0.0)), Parent(root)))
            .id();
        let grandchild = world
            .spawn((Transform::from_position(Vec3::new(0.0, 0.0, 2.0)), Parent(child)))
            .id();

        let origin = local_to_world(&world, grandchild).transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(10.0, 1.0, 2.0), 1e-5));
    }

    #[test]
    fn missing_transform_is_identity() {
        let mut world = World::new();
        let bare = world.spawn_empty().id();
        assert_eq!(local_to_world(&world, bare), Mat4::IDENTITY);
    }
}
