//! The GL capability surface the driver consumes.
//!
//! The driver never touches a GL context directly; it holds a [`GlBackend`]
//! injected at construction. This keeps the driver independent of how the
//! context was created (windowing, function loading) and lets the whole
//! driver run against a scripted backend in tests.

use core::fmt;

use vitrail_api::{Bitmap, VertexBufferFormat};

mod glow_backend;

pub use glow_backend::GlowBackend;

/// Shader pipeline stage, for object creation and diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Narrow GL surface used by [`crate::GlDriver`].
///
/// Methods mirror GL calls at a slightly higher level (one method per
/// driver-meaningful operation rather than per GL entry point), so a fake
/// implementation stays small. Object-creation calls are the only fallible
/// ones; everything else follows GL's fire-and-forget error model.
///
/// Implementations over a real context must only be driven from the thread
/// owning it.
pub trait GlBackend {
    type Shader: Copy + Eq + fmt::Debug;
    type Program: Copy + Eq + fmt::Debug;
    type Texture: Copy + Eq + fmt::Debug;
    type Buffer: Copy + Eq + fmt::Debug;
    type Framebuffer: Copy + Eq + fmt::Debug;

    // Shader program bring-up.
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    /// The shader's info log, unfiltered.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn delete_shader(&self, shader: Self::Shader);
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Option<Self::Program>);
    /// Points `name` at texture `unit`. The program must currently be in
    /// use.
    fn set_uniform_sampler(&self, program: Self::Program, name: &str, unit: i32);
    /// Uploads a 4x4 matrix uniform. The program must currently be in use.
    fn set_uniform_matrix(&self, program: Self::Program, name: &str, matrix: &[f32; 16]);

    // Textures.
    fn create_texture(&self) -> Result<Self::Texture, String>;
    /// Allocates undefined RGBA8 storage, for textures that will first be
    /// rendered into rather than uploaded.
    fn allocate_texture_storage(&self, texture: Self::Texture, width: u32, height: u32);
    fn upload_texture(&self, texture: Self::Texture, bitmap: &Bitmap);
    fn bind_texture(&self, unit: u32, texture: Option<Self::Texture>);
    fn delete_texture(&self, texture: Self::Texture);

    // Buffers.
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn upload_vertices(&self, buffer: Self::Buffer, data: &[u8]);
    fn upload_indices(&self, buffer: Self::Buffer, indices: &[u32]);
    /// Binds the pair and sets attribute pointers for `format`.
    fn bind_geometry(
        &self,
        vertices: Self::Buffer,
        format: VertexBufferFormat,
        indices: Self::Buffer,
    );
    fn delete_buffer(&self, buffer: Self::Buffer);

    // Framebuffers.
    /// Creates a framebuffer with `color` as its color attachment and
    /// verifies completeness.
    fn create_framebuffer(&self, color: Self::Texture) -> Result<Self::Framebuffer, String>;
    /// `None` binds the default framebuffer.
    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>);
    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer);

    // Per-draw state.
    fn set_viewport(&self, width: u32, height: u32);
    fn set_blend(&self, enabled: bool);
    /// `Some([x, y, width, height])` enables the scissor test.
    fn set_scissor(&self, rect: Option<[i32; 4]>);
    /// Clears the currently bound framebuffer to transparent black.
    fn clear(&self);
    /// Indexed triangle draw; `offset` is in indices, not bytes.
    fn draw_indexed(&self, count: u32, offset: u32);
}
