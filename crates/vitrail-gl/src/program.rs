//! Shader program bring-up.
//!
//! Programs are built exactly twice, at driver construction. The sequence is
//! strict: create both shader objects, attach sources, compile, inspect
//! logs, create the program, attach, link, check status, then detach and
//! delete the shader objects. A failure at any point aborts construction.

use core::fmt;

use crate::backend::{GlBackend, ShaderStage};
use crate::error::DriverError;

/// A linked GL program handle.
pub struct ShaderProgram<B: GlBackend> {
    pub(crate) program: B::Program,
}

impl<B: GlBackend> ShaderProgram<B> {
    pub fn handle(&self) -> B::Program {
        self.program
    }
}

impl<B: GlBackend> fmt::Debug for ShaderProgram<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.program)
            .finish()
    }
}

/// Compiles and links a program from a vertex/fragment source pair.
///
/// Any non-whitespace compile log is treated as a fatal
/// [`DriverError::Compile`], even if the GL driver reports compile success
/// alongside it;
/// informational logs differ wildly across vendors and accepting some but
/// not others would make construction failures driver-dependent. No link is
/// attempted after a compile failure.
///
/// On a compile failure the shader objects are not deleted. Construction is
/// aborted and the process is expected to exit, so the handles are reclaimed
/// with the context.
pub(crate) fn build_program<B: GlBackend>(
    backend: &B,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<B>, DriverError> {
    let vertex = backend
        .create_shader(ShaderStage::Vertex)
        .map_err(|detail| DriverError::backend("create_shader", detail))?;
    let fragment = backend
        .create_shader(ShaderStage::Fragment)
        .map_err(|detail| DriverError::backend("create_shader", detail))?;

    backend.shader_source(vertex, vertex_source);
    backend.shader_source(fragment, fragment_source);
    backend.compile_shader(vertex);
    backend.compile_shader(fragment);

    for (stage, shader) in [(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)] {
        let log = backend.shader_info_log(shader);
        if !log.trim().is_empty() {
            return Err(DriverError::Compile { stage, log });
        }
    }

    let program = backend
        .create_program()
        .map_err(|detail| DriverError::backend("create_program", detail))?;
    backend.attach_shader(program, vertex);
    backend.attach_shader(program, fragment);
    backend.link_program(program);
    if !backend.link_status(program) {
        return Err(DriverError::Link {
            log: backend.program_info_log(program),
        });
    }

    // A linked program keeps no dependency on its shader objects.
    backend.detach_shader(program, vertex);
    backend.detach_shader(program, fragment);
    backend.delete_shader(vertex);
    backend.delete_shader(fragment);

    Ok(ShaderProgram { program })
}
