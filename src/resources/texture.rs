//! Textures and samplers

use crate::backend::*;
use glam::UVec2;
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Decoded RGBA8 pixel data
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub data: Vec<u8>,
    pub name: String,
}

impl TextureData {
    /// Load texture from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let img = image::open(path).map_err(|e| RenderError::TextureLoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_image(img, &name))
    }

    /// Load texture from encoded bytes
    pub fn from_bytes(bytes: &[u8], name: &str) -> RenderResult<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| RenderError::TextureLoadFailed {
            path: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_image(img, name))
    }

    fn from_image(img: DynamicImage, name: &str) -> Self {
        let (width, height) = img.dimensions();
        // Rows are stored bottom-up to match the texture coordinate origin
        let rgba = image::imageops::flip_vertical(&img.to_rgba8());

        Self {
            width,
            height,
            format: TextureFormat::Rgba8Unorm,
            data: rgba.into_raw(),
            name: name.to_string(),
        }
    }

    /// Create a solid color texture
    pub fn solid_color(color: [u8; 4], name: &str) -> Self {
        Self {
            width: 1,
            height: 1,
            format: TextureFormat::Rgba8Unorm,
            data: color.to_vec(),
            name: name.to_string(),
        }
    }
}

/// A 2D texture living on the GPU
#[derive(Debug, Clone, PartialEq)]
pub struct Texture2D {
    handle: TextureHandle,
    size: UVec2,
    format: TextureFormat,
    name: String,
}

impl Texture2D {
    /// Upload decoded pixel data
    pub fn create<C: RenderContext + ?Sized>(
        ctx: &mut C,
        data: &TextureData,
        generate_mipmaps: bool,
    ) -> RenderResult<Self> {
        let mip_levels = if generate_mipmaps {
            32 - data.width.max(data.height).max(1).leading_zeros()
        } else {
            1
        };
        let handle = ctx.create_texture(
            &TextureDescriptor {
                label: Some(data.name.clone()),
                width: data.width,
                height: data.height,
                mip_levels,
                format: data.format,
                usage: TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
            },
            Some(&data.data),
        )?;

        Ok(Self {
            handle,
            size: UVec2::new(data.width, data.height),
            format: data.format,
            name: data.name.clone(),
        })
    }

    /// Decode an image file and upload it
    pub fn load<C: RenderContext + ?Sized, P: AsRef<Path>>(
        ctx: &mut C,
        path: P,
        generate_mipmaps: bool,
    ) -> RenderResult<Self> {
        let data = TextureData::from_file(path)?;
        Self::create(ctx, &data, generate_mipmaps)
    }

    /// Allocate an uninitialized render target
    pub fn empty<C: RenderContext + ?Sized>(
        ctx: &mut C,
        name: &str,
        format: TextureFormat,
        size: UVec2,
    ) -> RenderResult<Self> {
        let handle = ctx.create_texture(
            &TextureDescriptor {
                label: Some(name.to_string()),
                width: size.x,
                height: size.y,
                mip_levels: 1,
                format,
                usage: TextureUsage::RENDER_ATTACHMENT | TextureUsage::TEXTURE_BINDING,
            },
            None,
        )?;

        Ok(Self {
            handle,
            size,
            format,
            name: name.to_string(),
        })
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind to the currently active texture unit
    pub fn bind<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.bind_texture(self.handle);
    }

    pub fn destroy<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.destroy_texture(self.handle);
    }
}

/// Texture sampling parameters living on the GPU
#[derive(Debug, Clone, PartialEq)]
pub struct Sampler {
    handle: SamplerHandle,
    descriptor: SamplerDescriptor,
}

impl Sampler {
    pub fn create<C: RenderContext + ?Sized>(
        ctx: &mut C,
        descriptor: SamplerDescriptor,
    ) -> RenderResult<Self> {
        let handle = ctx.create_sampler(&descriptor)?;
        Ok(Self { handle, descriptor })
    }

    pub fn handle(&self) -> SamplerHandle {
        self.handle
    }

    pub fn descriptor(&self) -> &SamplerDescriptor {
        &self.descriptor
    }

    pub fn bind<C: RenderContext + ?Sized>(&self, ctx: &mut C, unit: u32) {
        ctx.bind_sampler(unit, self.handle);
    }

    pub fn destroy<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.destroy_sampler(self.handle);
    }
}
