//! Shader programs

use crate::backend::{ProgramHandle, RenderContext, RenderResult, ShaderSource, UniformValue};

/// A linked shader program with name-addressed uniforms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    name: String,
}

impl ShaderProgram {
    /// Compile and link a program from source files
    pub fn create<C: RenderContext + ?Sized>(
        ctx: &mut C,
        name: &str,
        stages: &[ShaderSource],
    ) -> RenderResult<Self> {
        let handle = ctx.create_shader_program(name, stages)?;
        Ok(Self {
            handle,
            name: name.to_string(),
        })
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make this the active program
    pub fn use_program<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.use_program(self.handle);
    }

    /// Write a uniform; the program must be active
    pub fn set<C: RenderContext + ?Sized>(
        &self,
        ctx: &mut C,
        uniform: &str,
        value: impl Into<UniformValue>,
    ) {
        ctx.set_uniform(self.handle, uniform, value.into());
    }

    pub fn destroy<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        ctx.destroy_shader_program(self.handle);
    }
}
