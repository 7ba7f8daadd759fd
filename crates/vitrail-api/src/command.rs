use crate::id::{GeometryId, RenderBufferId, TextureId};

/// Which of the two driver shader programs a draw uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    /// General fill program (solid colors, gradients, images).
    Fill,
    /// Path coverage program.
    FillPath,
}

/// Pipeline state accompanying a [`GpuCommand::DrawGeometry`].
///
/// Deliberately a plain value type: the driver applies it wholesale per draw
/// and keeps no state between commands.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuState {
    /// Render target for this draw.
    pub render_buffer: RenderBufferId,
    /// Program selection.
    pub shader: ShaderKind,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Column-major 4x4 orthographic/model transform, applied in the vertex
    /// shader.
    pub transform: [f32; 16],
    pub enable_blend: bool,
    pub enable_scissor: bool,
    /// `[x, y, width, height]` in framebuffer pixels; meaningful only when
    /// `enable_scissor` is set.
    pub scissor_rect: [i32; 4],
    /// Texture bound to sampler unit 0, if the draw samples one.
    pub texture_1: Option<TextureId>,
    /// Texture bound to sampler unit 1 (e.g. gradient ramps).
    pub texture_2: Option<TextureId>,
}

impl GpuState {
    /// A state drawing to `render_buffer` with `shader` and everything else
    /// at neutral defaults. Convenient for embedders and tests.
    pub fn new(render_buffer: RenderBufferId, shader: ShaderKind) -> Self {
        Self {
            render_buffer,
            shader,
            viewport_width: 0,
            viewport_height: 0,
            transform: IDENTITY,
            enable_blend: true,
            enable_scissor: false,
            scissor_rect: [0; 4],
            texture_1: None,
            texture_2: None,
        }
    }
}

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// One entry of a submitted command list.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    /// Clears the whole render buffer to transparent black.
    ClearRenderBuffer { render_buffer: RenderBufferId },
    /// Indexed draw of a sub-range of a geometry buffer pair.
    DrawGeometry {
        geometry: GeometryId,
        /// Number of indices to draw.
        indices_count: u32,
        /// Offset into the index buffer, in indices.
        indices_offset: u32,
        state: GpuState,
    },
}
