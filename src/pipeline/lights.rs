//! Light uniform upload
//!
//! Enabled lights fill `lights[0..n]` in collection order and `light_count`
//! is set to `n`. Disabled lights take no slot.

use glam::{Mat4, Vec3};

use crate::backend::RenderContext;
use crate::resources::ShaderProgram;
use crate::scene::{Light, LightKind};

/// A light captured for the current frame with its entity's world matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveLight {
    pub light: Light,
    pub local_to_world: Mat4,
}

impl ActiveLight {
    /// Snapshot `light`; positional lights take their entity's world origin
    pub fn new(light: &Light, local_to_world: Mat4) -> Self {
        let mut light = *light;
        if light.kind.is_positional() {
            light.position = local_to_world.transform_point3(Vec3::ZERO);
        }
        Self {
            light,
            local_to_world,
        }
    }

    pub fn world_direction(&self) -> Vec3 {
        self.local_to_world
            .transform_vector3(self.light.direction)
            .normalize_or_zero()
    }
}

/// Upload every enabled light and the light count; returns the count
pub fn upload_lights<C: RenderContext + ?Sized>(
    ctx: &mut C,
    shader: &ShaderProgram,
    lights: &[ActiveLight],
) -> i32 {
    let mut count = 0;
    for active in lights.iter().filter(|active| active.light.enabled) {
        let light = &active.light;
        let prefix = format!("lights[{count}].");
        let uniform = |field: &str| format!("{prefix}{field}");

        shader.set(ctx, &uniform("diffuse"), light.diffuse);
        shader.set(ctx, &uniform("specular"), light.specular);
        shader.set(ctx, &uniform("ambient"), light.ambient);
        shader.set(ctx, &uniform("type"), light.kind.tag());
        shader.set(ctx, &uniform("color"), light.color);
        shader.set(ctx, &uniform("direction"), active.world_direction());

        if light.kind.is_positional() {
            shader.set(ctx, &uniform("position"), light.position);
            shader.set(ctx, &uniform("attenuation_constant"), light.attenuation.constant);
            shader.set(ctx, &uniform("attenuation_linear"), light.attenuation.linear);
            shader.set(ctx, &uniform("attenuation_quadratic"), light.attenuation.quadratic);
        }
        if light.kind == LightKind::Spot {
            shader.set(ctx, &uniform("inner_angle"), light.spot_angle.inner);
            shader.set(ctx, &uniform("outer_angle"), light.spot_angle.outer);
        }
        count += 1;
    }
    shader.set(ctx, "light_count", count);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RecordingContext, ShaderSource, UniformValue};
    use glam::Quat;
    use rstest::rstest;

    fn shader(ctx: &mut RecordingContext) -> ShaderProgram {
        ShaderProgram::create(ctx, "lit", &[ShaderSource::vertex("lit.vert")]).unwrap()
    }

    fn light(kind: LightKind, diffuse: f32, enabled: bool) -> ActiveLight {
        let mut light = Light::new(kind);
        light.diffuse = Vec3::splat(diffuse);
        light.enabled = enabled;
        ActiveLight::new(&light, Mat4::IDENTITY)
    }

    #[test]
    fn disabled_lights_take_no_slot() {
        let mut ctx = RecordingContext::new();
        let shader = shader(&mut ctx);
        let lights = [
            light(LightKind::Point, 1.0, true),
            light(LightKind::Point, 2.0, false),
            light(LightKind::Point, 3.0, true),
        ];

        assert_eq!(upload_lights(&mut ctx, &shader, &lights), 2);
        assert_eq!(ctx.last_uniform("light_count"), Some(UniformValue::Int(2)));
        assert_eq!(
            ctx.last_uniform("lights[0].diffuse"),
            Some(UniformValue::Vec3(Vec3::splat(1.0)))
        );
        assert_eq!(
            ctx.last_uniform("lights[1].diffuse"),
            Some(UniformValue::Vec3(Vec3::splat(3.0)))
        );
        assert!(ctx
            .uniform_writes()
            .iter()
            .all(|(name, _)| !name.starts_with("lights[2]")));
    }

    #[rstest]
    #[case(LightKind::Directional, 6)]
    #[case(LightKind::Point, 10)]
    #[case(LightKind::Spot, 12)]
    fn fields_per_kind(#[case] kind: LightKind, #[case] fields: usize) {
        let mut ctx = RecordingContext::new();
        let shader = shader(&mut ctx);
        upload_lights(&mut ctx, &shader, &[light(kind, 1.0, true)]);

        let written = ctx
            .uniform_writes()
            .iter()
            .filter(|(name, _)| name.starts_with("lights[0]."))
            .count();
        assert_eq!(written, fields);
        assert_eq!(
            ctx.last_uniform("lights[0].type"),
            Some(UniformValue::Int(kind.tag()))
        );
    }

    #[test]
    fn position_and_direction_follow_world_transform() {
        let mut light = Light::new(LightKind::Spot);
        light.direction = Vec3::new(0.0, 0.0, -3.0);
        let world = Mat4::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(4.0, 5.0, 6.0),
        );
        let active = ActiveLight::new(&light, world);

        assert!(active.light.position.abs_diff_eq(Vec3::new(4.0, 5.0, 6.0), 1e-5));
        assert!(active.world_direction().abs_diff_eq(-Vec3::X, 1e-5));
    }

    #[test]
    fn no_lights_uploads_zero_count() {
        let mut ctx = RecordingContext::new();
        let shader = shader(&mut ctx);
        assert_eq!(upload_lights(&mut ctx, &shader, &[]), 0);
        assert_eq!(ctx.last_uniform("light_count"), Some(UniformValue::Int(0)));
    }
}
