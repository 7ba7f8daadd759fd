use crate::id::TextureId;

/// Description of an offscreen render target.
///
/// A render buffer renders into an existing texture; `texture` is a
/// non-owning reference into the texture namespace. The texture must have
/// been allocated before the render buffer is created, but need not have
/// pixel data uploaded yet. Destroying the render buffer never destroys the
/// texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RenderBufferDesc {
    /// Color attachment target, by id.
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}
