//! Renderer configuration
//!
//! Read from the `renderer` record of a scene file:
//!
//! ```json
//! { "sky": "assets/textures/sky.jpg", "postprocess": "assets/shaders/postprocess/vignette.frag" }
//! ```
//!
//! Each optional key enables its sub-pass. The remaining keys override the
//! shader paths and sphere resolution the sub-passes are built with.

use glam::UVec2;
use serde_json::Value;

use crate::json::{read_field, read_str};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Sky texture path
    pub sky: Option<String>,
    /// Post-process fragment shader path
    pub postprocess: Option<String>,
    pub sky_vertex_shader: String,
    pub sky_fragment_shader: String,
    pub fullscreen_vertex_shader: String,
    /// Sphere slices and stacks
    pub sky_sphere_segments: [u32; 2],
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            sky: None,
            postprocess: None,
            sky_vertex_shader: "assets/shaders/textured.vert".into(),
            sky_fragment_shader: "assets/shaders/textured.frag".into(),
            fullscreen_vertex_shader: "assets/shaders/fullscreen.vert".into(),
            sky_sphere_segments: [16, 16],
        }
    }
}

impl RendererConfig {
    /// Parse a `renderer` record
    ///
    /// Each key falls back to its own default when absent or malformed.
    pub fn from_json(data: &Value) -> Self {
        let mut config = Self::default();
        if !data.is_object() {
            log::debug!("Renderer config is not an object, using defaults");
            return config;
        }
        config.sky = read_str(data, "sky").map(String::from);
        config.postprocess = read_str(data, "postprocess").map(String::from);
        for (key, path) in [
            ("sky_vertex_shader", &mut config.sky_vertex_shader),
            ("sky_fragment_shader", &mut config.sky_fragment_shader),
            ("fullscreen_vertex_shader", &mut config.fullscreen_vertex_shader),
        ] {
            if let Some(value) = read_str(data, key) {
                *path = value.to_owned();
            }
        }
        if let Some(segments) = read_field(data, "sky_sphere_segments") {
            config.sky_sphere_segments = segments;
        }
        config
    }

    pub fn with_sky(mut self, path: impl Into<String>) -> Self {
        self.sky = Some(path.into());
        self
    }

    pub fn with_postprocess(mut self, path: impl Into<String>) -> Self {
        self.postprocess = Some(path.into());
        self
    }

    pub fn sky_segments(&self) -> UVec2 {
        UVec2::from_array(self.sky_sphere_segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_keys_disable_passes() {
        let config = RendererConfig::from_json(&json!({}));
        assert_eq!(config, RendererConfig::default());
        assert!(config.sky.is_none());
        assert!(config.postprocess.is_none());
    }

    #[test]
    fn reads_pass_paths() {
        let config = RendererConfig::from_json(&json!({
            "sky": "sky.png",
            "postprocess": "vignette.frag",
            "sky_sphere_segments": [32, 8]
        }));
        assert_eq!(config.sky.as_deref(), Some("sky.png"));
        assert_eq!(config.postprocess.as_deref(), Some("vignette.frag"));
        assert_eq!(config.sky_segments(), UVec2::new(32, 8));
        assert_eq!(config.fullscreen_vertex_shader, "assets/shaders/fullscreen.vert");
    }

    #[test]
    fn non_object_records_use_defaults() {
        assert_eq!(RendererConfig::from_json(&json!("sky.png")), RendererConfig::default());
    }

    #[test]
    fn malformed_keys_leave_siblings_intact() {
        let config = RendererConfig::from_json(&json!({
            "sky": "sky.png",
            "sky_sphere_segments": [16]
        }));
        assert_eq!(config.sky.as_deref(), Some("sky.png"));
        assert_eq!(config.sky_sphere_segments, [16, 16]);

        let config = RendererConfig::from_json(&json!({
            "sky": "sky.png",
            "postprocess": 7,
            "fullscreen_vertex_shader": "quad.vert"
        }));
        assert_eq!(config.sky.as_deref(), Some("sky.png"));
        assert!(config.postprocess.is_none());
        assert_eq!(config.fullscreen_vertex_shader, "quad.vert");

        let config = RendererConfig::from_json(&json!({ "sky": 42, "postprocess": "fx.frag" }));
        assert!(config.sky.is_none());
        assert_eq!(config.postprocess.as_deref(), Some("fx.frag"));
    }
}
