//! Light component

use bevy_ecs::prelude::*;
use glam::Vec3;
use serde_json::Value;

use crate::json::{read_bool, read_f32, read_str, read_vec3};

/// Light type, uploaded to shaders as an integer tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    Directional,
    #[default]
    Point,
    Spot,
}

impl LightKind {
    /// Unknown names are treated as point lights
    pub fn from_name(name: &str) -> Self {
        match name {
            "directional" => LightKind::Directional,
            "spot" => LightKind::Spot,
            _ => LightKind::Point,
        }
    }

    pub fn tag(&self) -> i32 {
        match self {
            LightKind::Directional => 0,
            LightKind::Point => 1,
            LightKind::Spot => 2,
        }
    }

    /// Whether the light has a position and falls off with distance
    pub fn is_positional(&self) -> bool {
        !matches!(self, LightKind::Directional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

/// Spot cone angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpotAngle {
    pub inner: f32,
    pub outer: f32,
}

/// Light emitted from the owning entity
///
/// `direction` is in the entity's local space. `position` is derived from
/// the entity's world transform every frame and is never read from a record.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
    pub color: Vec3,
    pub direction: Vec3,
    pub position: Vec3,
    pub enabled: bool,
    pub attenuation: Attenuation,
    pub spot_angle: SpotAngle,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightKind::Point,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            ambient: Vec3::ZERO,
            color: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            position: Vec3::ZERO,
            enabled: true,
            attenuation: Attenuation::default(),
            spot_angle: SpotAngle::default(),
        }
    }
}

impl Light {
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Apply a light record
    ///
    /// Color channels, direction, attenuation and `enabled` keep their current
    /// value when absent. Cone angles reset to zero when absent. Non-object
    /// records are ignored.
    ///
    /// A fresh light has zero attenuation, so point and spot records should
    /// carry `attenuation` for shaders that divide by it.
    pub fn deserialize(&mut self, data: &Value) {
        if !data.is_object() {
            return;
        }
        self.kind = LightKind::from_name(read_str(data, "light_type").unwrap_or("point"));

        self.diffuse = read_vec3(data, "diffuse").unwrap_or(self.diffuse);
        self.specular = read_vec3(data, "specular").unwrap_or(self.specular);
        self.ambient = read_vec3(data, "ambient").unwrap_or(self.ambient);
        self.color = read_vec3(data, "color").unwrap_or(self.color);
        self.direction = read_vec3(data, "direction").unwrap_or(self.direction);
        self.enabled = read_bool(data, "enabled").unwrap_or(self.enabled);

        self.spot_angle = SpotAngle {
            inner: read_f32(data, "angle_inner").unwrap_or(0.0),
            outer: read_f32(data, "angle_outer").unwrap_or(0.0),
        };

        // Stored as [constant, linear, quadratic]
        if let Some(att) = read_vec3(data, "attenuation") {
            self.attenuation = Attenuation {
                constant: att.x,
                linear: att.y,
                quadratic: att.z,
            };
        }
    }
}
