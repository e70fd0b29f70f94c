//! Mesh data structures and generation

use crate::backend::{MeshHandle, RenderContext, RenderResult, Vertex};
use glam::{UVec2, Vec2, Vec3};

/// CPU-side mesh with vertex and index data
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub name: String,
}

impl MeshData {
    pub fn new(name: &str) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            name: name.to_string(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Get index data as bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Create a unit-radius UV sphere centered at origin
    ///
    /// `segments.x` slices around the vertical axis, `segments.y` stacks from
    /// pole to pole. Triangles wind counter-clockwise seen from outside.
    pub fn sphere(segments: UVec2) -> Self {
        let mut mesh = MeshData::new("sphere");
        let slices = segments.x.max(3);
        let stacks = segments.y.max(2);

        let slice_angle = 2.0 * std::f32::consts::PI / slices as f32;
        let stack_angle = std::f32::consts::PI / stacks as f32;

        for stack in 0..=stacks {
            let phi = stack as f32 * stack_angle;
            let y = -phi.cos();
            let ring_radius = phi.sin();

            for slice in 0..=slices {
                let theta = slice as f32 * slice_angle;
                let normal = Vec3::new(ring_radius * theta.cos(), y, -ring_radius * theta.sin());

                mesh.vertices.push(Vertex {
                    position: normal,
                    color: [255; 4],
                    uv: Vec2::new(
                        slice as f32 / slices as f32,
                        stack as f32 / stacks as f32,
                    ),
                    normal,
                });
            }
        }

        for stack in 0..stacks {
            for slice in 0..slices {
                let current = stack * (slices + 1) + slice;
                let above = current + slices + 1;

                mesh.indices.extend_from_slice(&[
                    current,
                    current + 1,
                    above + 1,
                    above + 1,
                    above,
                    current,
                ]);
            }
        }

        mesh
    }
}

/// A mesh uploaded to the GPU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    handle: MeshHandle,
    name: String,
    index_count: u32,
}

impl Mesh {
    pub fn create<C: RenderContext + ?Sized>(ctx: &mut C, data: &MeshData) -> RenderResult<Self> {
        let handle = ctx.create_mesh(data)?;
        Ok(Self {
            handle,
            name: data.name.clone(),
            index_count: data.indices.len() as u32,
        })
    }

    pub fn handle(&self) -> MeshHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn draw<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.draw_mesh(self.handle);
    }

    pub fn destroy<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.destroy_mesh(self.handle);
    }
}
