//! Common types shared between the renderer and GPU contexts

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::Deserialize;

/// Texture format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8 bits per channel RGBA
    Rgba8Unorm,
    Rgba8UnormSrgb,
    /// 24-bit depth component
    Depth24,
}

impl TextureFormat {
    pub fn is_depth(&self) -> bool {
        matches!(self, TextureFormat::Depth24)
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => 4,
            TextureFormat::Depth24 => 3,
        }
    }
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUsage(u32);

impl TextureUsage {
    pub const COPY_DST: Self = Self(1 << 0);
    pub const TEXTURE_BINDING: Self = Self(1 << 1);
    pub const RENDER_ATTACHMENT: Self = Self(1 << 2);

    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for TextureUsage {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Texture descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor {
    pub label: Option<String>,
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            width: 1,
            height: 1,
            mip_levels: 1,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
        }
    }
}

/// Filter mode for samplers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Address mode for samplers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    ClampToEdge,
    Repeat,
    MirrorRepeat,
}

/// Sampler descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerDescriptor {
    pub label: Option<String>,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
}

impl Default for SamplerDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
        }
    }
}

/// Which faces are discarded when face culling is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CullMode {
    #[serde(rename = "GL_FRONT")]
    Front,
    #[default]
    #[serde(rename = "GL_BACK")]
    Back,
    #[serde(rename = "GL_FRONT_AND_BACK")]
    FrontAndBack,
}

/// Front face winding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FrontFace {
    #[default]
    #[serde(rename = "GL_CCW")]
    Ccw,
    #[serde(rename = "GL_CW")]
    Cw,
}

/// Compare function for depth testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CompareFunction {
    #[serde(rename = "GL_NEVER")]
    Never,
    #[default]
    #[serde(rename = "GL_LESS")]
    Less,
    #[serde(rename = "GL_EQUAL")]
    Equal,
    #[serde(rename = "GL_LEQUAL")]
    LessEqual,
    #[serde(rename = "GL_GREATER")]
    Greater,
    #[serde(rename = "GL_NOTEQUAL")]
    NotEqual,
    #[serde(rename = "GL_GEQUAL")]
    GreaterEqual,
    #[serde(rename = "GL_ALWAYS")]
    Always,
}

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BlendFactor {
    #[serde(rename = "GL_ZERO")]
    Zero,
    #[serde(rename = "GL_ONE")]
    One,
    #[serde(rename = "GL_SRC_COLOR")]
    Src,
    #[serde(rename = "GL_ONE_MINUS_SRC_COLOR")]
    OneMinusSrc,
    #[serde(rename = "GL_DST_COLOR")]
    Dst,
    #[serde(rename = "GL_ONE_MINUS_DST_COLOR")]
    OneMinusDst,
    #[serde(rename = "GL_SRC_ALPHA")]
    SrcAlpha,
    #[serde(rename = "GL_ONE_MINUS_SRC_ALPHA")]
    OneMinusSrcAlpha,
    #[serde(rename = "GL_DST_ALPHA")]
    DstAlpha,
    #[serde(rename = "GL_ONE_MINUS_DST_ALPHA")]
    OneMinusDstAlpha,
    #[serde(rename = "GL_CONSTANT_COLOR")]
    Constant,
    #[serde(rename = "GL_ONE_MINUS_CONSTANT_COLOR")]
    OneMinusConstant,
    #[serde(rename = "GL_CONSTANT_ALPHA")]
    ConstantAlpha,
    #[serde(rename = "GL_ONE_MINUS_CONSTANT_ALPHA")]
    OneMinusConstantAlpha,
}

/// Blend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum BlendOperation {
    #[default]
    #[serde(rename = "GL_FUNC_ADD")]
    Add,
    #[serde(rename = "GL_FUNC_SUBTRACT")]
    Subtract,
    #[serde(rename = "GL_FUNC_REVERSE_SUBTRACT")]
    ReverseSubtract,
    #[serde(rename = "GL_MIN")]
    Min,
    #[serde(rename = "GL_MAX")]
    Max,
}

/// Buffers affected by a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearFlags(u32);

impl ClearFlags {
    pub const COLOR: Self = Self(1 << 0);
    pub const DEPTH: Self = Self(1 << 1);

    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ClearFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    IncompleteAttachment,
    MissingAttachment,
    Unsupported,
}

impl std::fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FramebufferStatus::Complete => "complete",
            FramebufferStatus::IncompleteAttachment => "incomplete attachment",
            FramebufferStatus::MissingAttachment => "missing attachment",
            FramebufferStatus::Unsupported => "unsupported attachment combination",
        };
        f.write_str(text)
    }
}

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// A shader stage to compile into a program, by source file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub path: String,
}

impl ShaderSource {
    pub fn vertex(path: impl Into<String>) -> Self {
        Self {
            stage: ShaderStage::Vertex,
            path: path.into(),
        }
    }

    pub fn fragment(path: impl Into<String>) -> Self {
        Self {
            stage: ShaderStage::Fragment,
            path: path.into(),
        }
    }
}

/// A value written to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

/// Standard vertex with position, color, UV, and normal
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub color: [u8; 4],
    pub uv: Vec2,
    pub normal: Vec3,
}
