//! Forward renderer
//!
//! Each frame walks the world once, then draws in a fixed order:
//!
//! 1. clear
//! 2. opaque commands, in collection order
//! 3. sky sphere, if configured
//! 4. transparent commands, far to near
//! 5. post-process composite, if configured
//!
//! With post-processing, steps 1-4 target the offscreen framebuffer.

use bevy_ecs::world::World;
use glam::{Mat4, UVec2, Vec3, Vec4};

use super::{
    sort_back_to_front, upload_lights, ActiveLight, PostProcessPass, RenderCommand, SkyPass,
};
use crate::backend::{ClearFlags, RenderContext, RenderResult};
use crate::config::RendererConfig;
use crate::scene::{local_to_world, Camera, Light, MeshRenderer};

/// Camera values shared by every draw of a frame
#[derive(Debug, Clone, Copy)]
struct FrameCamera {
    view_projection: Mat4,
    position: Vec3,
}

pub struct ForwardRenderer {
    window_size: UVec2,
    sky: Option<SkyPass>,
    postprocess: Option<PostProcessPass>,
    lights: Vec<ActiveLight>,
    opaque: Vec<RenderCommand>,
    transparent: Vec<RenderCommand>,
}

impl ForwardRenderer {
    /// Build the sub-passes enabled by `config`
    ///
    /// On failure nothing created here is left alive.
    pub fn initialize<C: RenderContext + ?Sized>(
        ctx: &mut C,
        window_size: UVec2,
        config: &RendererConfig,
    ) -> RenderResult<Self> {
        let sky = match &config.sky {
            Some(path) => Some(SkyPass::create(ctx, config, path)?),
            None => None,
        };

        let postprocess = match &config.postprocess {
            Some(fragment_shader) => {
                match PostProcessPass::create(ctx, config, fragment_shader, window_size) {
                    Ok(pass) => Some(pass),
                    Err(err) => {
                        if let Some(sky) = sky {
                            sky.release(ctx);
                        }
                        return Err(err);
                    }
                }
            }
            None => None,
        };

        log::info!(
            "Forward renderer initialized on {} ({}x{}, sky: {}, post-process: {})",
            ctx.name(),
            window_size.x,
            window_size.y,
            sky.is_some(),
            postprocess.is_some()
        );

        Ok(Self {
            window_size,
            sky,
            postprocess,
            lights: Vec::new(),
            opaque: Vec::new(),
            transparent: Vec::new(),
        })
    }

    pub fn window_size(&self) -> UVec2 {
        self.window_size
    }

    pub fn sky(&self) -> Option<&SkyPass> {
        self.sky.as_ref()
    }

    pub fn postprocess(&self) -> Option<&PostProcessPass> {
        self.postprocess.as_ref()
    }

    /// Commands collected by the last frame
    pub fn opaque_commands(&self) -> &[RenderCommand] {
        &self.opaque
    }

    /// Transparent commands of the last frame, in draw order
    pub fn transparent_commands(&self) -> &[RenderCommand] {
        &self.transparent
    }

    /// Draw one frame of `world`
    pub fn render<C: RenderContext + ?Sized>(&mut self, world: &World, ctx: &mut C) {
        let Some((camera, camera_to_world)) = self.collect(world) else {
            log::trace!("No camera in the world, skipping frame");
            return;
        };

        let camera_forward = camera_to_world.transform_vector3(Vec3::NEG_Z);
        sort_back_to_front(&mut self.transparent, camera_forward);

        let frame = FrameCamera {
            view_projection: camera.projection_matrix(self.window_size)
                * Camera::view_matrix(camera_to_world),
            position: camera_to_world.transform_point3(Vec3::ZERO),
        };

        ctx.set_viewport(0, 0, self.window_size.x, self.window_size.y);
        ctx.set_clear_color(Vec4::new(0.0, 0.0, 0.0, 1.0));
        ctx.set_clear_depth(1.0);
        // Materials may have left writes disabled
        ctx.set_color_mask([true; 4]);
        ctx.set_depth_mask(true);

        if let Some(postprocess) = &self.postprocess {
            postprocess.begin(ctx);
        }
        ctx.clear(ClearFlags::COLOR | ClearFlags::DEPTH);

        for command in &self.opaque {
            draw_command(ctx, command, &frame, &self.lights);
        }

        if let Some(sky) = &self.sky {
            sky.draw(ctx, frame.view_projection, frame.position);
        }

        for command in &self.transparent {
            draw_command(ctx, command, &frame, &self.lights);
        }

        if let Some(postprocess) = &self.postprocess {
            postprocess.composite(ctx);
        }

        log::trace!(
            "Frame drawn: {} opaque, {} transparent, {} lights",
            self.opaque.len(),
            self.transparent.len(),
            self.lights.len()
        );
    }

    /// Rebuild the per-frame lists and find the first camera
    fn collect(&mut self, world: &World) -> Option<(Camera, Mat4)> {
        self.lights.clear();
        self.opaque.clear();
        self.transparent.clear();

        let mut camera = None;
        for entity in world.iter_entities() {
            let id = entity.id();
            if camera.is_none() {
                if let Some(found) = entity.get::<Camera>() {
                    camera = Some((*found, local_to_world(world, id)));
                }
            }
            if let Some(light) = entity.get::<Light>() {
                self.lights.push(ActiveLight::new(light, local_to_world(world, id)));
            }
            if let Some(renderer) = entity.get::<MeshRenderer>() {
                let command = RenderCommand::new(
                    local_to_world(world, id),
                    renderer.mesh.clone(),
                    renderer.material.clone(),
                );
                if command.material.transparent {
                    self.transparent.push(command);
                } else {
                    self.opaque.push(command);
                }
            }
        }
        camera
    }

    /// Release the sky and post-process objects
    ///
    /// Safe to call more than once; only the first call releases anything.
    pub fn destroy<C: RenderContext + ?Sized>(&mut self, ctx: &mut C) {
        if let Some(sky) = self.sky.take() {
            sky.release(ctx);
        }
        if let Some(postprocess) = self.postprocess.take() {
            postprocess.release(ctx);
        }
        self.lights.clear();
        self.opaque.clear();
        self.transparent.clear();
    }
}

impl Drop for ForwardRenderer {
    fn drop(&mut self) {
        if self.sky.is_some() || self.postprocess.is_some() {
            log::warn!("ForwardRenderer dropped without destroy(), GPU objects leaked");
        }
    }
}

fn draw_command<C: RenderContext + ?Sized>(
    ctx: &mut C,
    command: &RenderCommand,
    frame: &FrameCamera,
    lights: &[ActiveLight],
) {
    let material = &command.material;
    let Some(shader) = material.setup(ctx) else {
        log::warn!(
            "Skipping draw of mesh '{}': material has no shader",
            command.mesh.name()
        );
        return;
    };

    let object_to_world = command.local_to_world;
    if let Some(lighting) = &material.lighting {
        upload_lights(ctx, shader, lights);
        shader.set(ctx, "object_to_world", object_to_world);
        shader.set(
            ctx,
            "object_to_world_inv_transpose",
            object_to_world.inverse().transpose(),
        );
        shader.set(ctx, "view_projection", frame.view_projection);
        shader.set(ctx, "camera_position", frame.position);
        // Second upload of the values setup() already wrote
        lighting.upload(ctx, shader);
    }

    shader.set(ctx, "transform", frame.view_projection * object_to_world);
    command.mesh.draw(ctx);
}
