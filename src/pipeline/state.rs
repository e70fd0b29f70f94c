//! Fixed-function pipeline state
//!
//! A [`PipelineState`] is applied as a whole before each draw batch. Scene
//! files describe it with camelCase keys and OpenGL enum names:
//!
//! ```json
//! {
//!     "faceCulling": { "enabled": true, "culledFace": "GL_BACK" },
//!     "depthTesting": { "enabled": true, "function": "GL_LEQUAL" },
//!     "blending": {
//!         "enabled": true,
//!         "sourceFactor": "GL_SRC_ALPHA",
//!         "destinationFactor": "GL_ONE_MINUS_SRC_ALPHA"
//!     },
//!     "depthMask": false
//! }
//! ```

use glam::Vec4;
use serde_json::Value;

use crate::backend::{
    BlendFactor, BlendOperation, CompareFunction, CullMode, FrontFace, RenderContext,
};
use crate::json::{read_bool, read_field, read_vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCulling {
    pub enabled: bool,
    pub culled_face: CullMode,
    pub front_face: FrontFace,
}

impl Default for FaceCulling {
    fn default() -> Self {
        Self {
            enabled: false,
            culled_face: CullMode::Back,
            front_face: FrontFace::Ccw,
        }
    }
}

impl FaceCulling {
    fn read(&mut self, data: &Value) {
        self.enabled = read_bool(data, "enabled").unwrap_or(self.enabled);
        self.culled_face = read_field(data, "culledFace").unwrap_or(self.culled_face);
        self.front_face = read_field(data, "frontFace").unwrap_or(self.front_face);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthTesting {
    pub enabled: bool,
    pub function: CompareFunction,
}

impl Default for DepthTesting {
    fn default() -> Self {
        Self {
            enabled: false,
            function: CompareFunction::Less,
        }
    }
}

impl DepthTesting {
    fn read(&mut self, data: &Value) {
        self.enabled = read_bool(data, "enabled").unwrap_or(self.enabled);
        self.function = read_field(data, "function").unwrap_or(self.function);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blending {
    pub enabled: bool,
    pub equation: BlendOperation,
    pub source_factor: BlendFactor,
    pub destination_factor: BlendFactor,
    pub constant_color: Vec4,
}

impl Default for Blending {
    fn default() -> Self {
        Self {
            enabled: false,
            equation: BlendOperation::Add,
            source_factor: BlendFactor::SrcAlpha,
            destination_factor: BlendFactor::OneMinusSrcAlpha,
            constant_color: Vec4::ZERO,
        }
    }
}

impl Blending {
    fn read(&mut self, data: &Value) {
        self.enabled = read_bool(data, "enabled").unwrap_or(self.enabled);
        self.equation = read_field(data, "equation").unwrap_or(self.equation);
        self.source_factor = read_field(data, "sourceFactor").unwrap_or(self.source_factor);
        self.destination_factor =
            read_field(data, "destinationFactor").unwrap_or(self.destination_factor);
        self.constant_color = read_vec4(data, "constantColor").unwrap_or(self.constant_color);
    }
}

/// Depth, culling, blending and write-mask state for a draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineState {
    pub face_culling: FaceCulling,
    pub depth_testing: DepthTesting,
    pub blending: Blending,
    pub color_mask: [bool; 4],
    pub depth_mask: bool,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            face_culling: FaceCulling::default(),
            depth_testing: DepthTesting::default(),
            blending: Blending::default(),
            color_mask: [true; 4],
            depth_mask: true,
        }
    }
}

impl PipelineState {
    /// Read a pipeline state record
    ///
    /// Absent or malformed fields keep their defaults without affecting the
    /// rest of the record.
    pub fn from_json(data: &Value) -> Self {
        let mut state = Self::default();
        if !data.is_object() {
            return state;
        }
        if let Some(section) = data.get("faceCulling") {
            state.face_culling.read(section);
        }
        if let Some(section) = data.get("depthTesting") {
            state.depth_testing.read(section);
        }
        if let Some(section) = data.get("blending") {
            state.blending.read(section);
        }
        state.color_mask = read_field(data, "colorMask").unwrap_or(state.color_mask);
        state.depth_mask = read_bool(data, "depthMask").unwrap_or(state.depth_mask);
        state
    }

    /// Apply this state to the context
    pub fn setup<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.apply_pipeline_state(self);
    }
}
