//! Camera component

use bevy_ecs::prelude::*;
use glam::{Mat4, UVec2, Vec3};
use serde_json::Value;

use crate::json::{read_f32, read_str};

/// Camera projection type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in radians
    Perspective { fov_y: f32 },
    /// Height of the view volume in world units
    Orthographic { height: f32 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            fov_y: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Views the scene from its entity's world origin along local -Z
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            near: 0.01,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn perspective(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Projection::Perspective {
                fov_y: fov_y_degrees.to_radians(),
            },
            near,
            far,
        }
    }

    pub fn orthographic(height: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Projection::Orthographic { height },
            near,
            far,
        }
    }

    /// Read `cameraType`, `fovAngle` (degrees), `orthoHeight`, `near`, `far`
    pub fn deserialize(&mut self, data: &Value) {
        if !data.is_object() {
            return;
        }
        self.near = read_f32(data, "near").unwrap_or(self.near);
        self.far = read_f32(data, "far").unwrap_or(self.far);

        let orthographic = read_str(data, "cameraType") == Some("orthographic");
        self.projection = if orthographic {
            Projection::Orthographic {
                height: read_f32(data, "orthoHeight").unwrap_or(1.0),
            }
        } else {
            Projection::Perspective {
                fov_y: read_f32(data, "fovAngle").unwrap_or(90.0).to_radians(),
            }
        };
    }

    /// OpenGL clip-space projection for a target of the given size
    pub fn projection_matrix(&self, viewport: UVec2) -> Mat4 {
        let aspect = viewport.x.max(1) as f32 / viewport.y.max(1) as f32;
        match self.projection {
            Projection::Perspective { fov_y } => {
                Mat4::perspective_rh_gl(fov_y, aspect, self.near, self.far)
            }
            Projection::Orthographic { height } => {
                let half_h = height / 2.0;
                let half_w = half_h * aspect;
                Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }

    /// World-to-view matrix for a camera entity with the given world matrix
    pub fn view_matrix(local_to_world: Mat4) -> Mat4 {
        let eye = local_to_world.transform_point3(Vec3::ZERO);
        let center = local_to_world.transform_point3(-Vec3::Z);
        let up = local_to_world.transform_vector3(Vec3::Y);
        Mat4::look_at_rh(eye, center, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec4};
    use serde_json::json;

    #[test]
    fn deserialize_converts_degrees() {
        let mut camera = Camera::default();
        camera.deserialize(&json!({ "fovAngle": 60, "near": 0.5, "far": 50 }));
        assert_eq!(camera.near, 0.5);
        assert_eq!(camera.far, 50.0);
        match camera.projection {
            Projection::Perspective { fov_y } => {
                assert!((fov_y - 60f32.to_radians()).abs() < 1e-6)
            }
            other => panic!("unexpected projection: {other:?}"),
        }
    }

    #[test]
    fn orthographic_record() {
        let mut camera = Camera::default();
        camera.deserialize(&json!({ "cameraType": "orthographic", "orthoHeight": 4 }));
        assert_eq!(camera.projection, Projection::Orthographic { height: 4.0 });

        let proj = camera.projection_matrix(UVec2::new(200, 100));
        let corner = proj * Vec4::new(4.0, 2.0, -1.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn view_looks_down_local_negative_z() {
        let world = Mat4::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(0.0, 0.0, 5.0),
        );
        let view = Camera::view_matrix(world);
        // Eye maps to the view origin, a point ahead maps to view -Z
        assert!(view.transform_point3(Vec3::new(0.0, 0.0, 5.0)).abs_diff_eq(Vec3::ZERO, 1e-5));
        let ahead = view.transform_point3(Vec3::new(-3.0, 0.0, 5.0));
        assert!(ahead.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-5));
    }

    #[test]
    fn far_plane_maps_to_depth_one() {
        let camera = Camera::perspective(90.0, 0.1, 10.0);
        let clip = camera.projection_matrix(UVec2::new(640, 480)) * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!((clip.z / clip.w - 1.0).abs() < 1e-5);
    }
}
