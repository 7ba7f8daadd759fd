use crate::bitmap::Bitmap;
use crate::command::GpuCommand;
use crate::geometry::{IndexBuffer, VertexBuffer};
use crate::id::{GeometryId, RenderBufferId, TextureId};
use crate::render_buffer::RenderBufferDesc;

/// The GPU driver capability consumed by the embedded renderer.
///
/// The renderer drives resource lifetimes entirely through this trait: it
/// asks for a fresh id (`next_*_id`), uploads data under that id
/// (`create_*` / `update_*`), references the id from submitted command
/// lists, and finally releases it (`destroy_*`). Implementations own the
/// backend GPU objects keyed by those ids.
///
/// # Calling contract
///
/// - All calls come from the single thread owning the graphics context.
/// - Every id passed in was previously returned by the matching `next_*_id`
///   and has not been destroyed since. Violations surface as errors that the
///   embedding should treat as fatal: the id/resource correspondence can no
///   longer be trusted.
/// - `begin_synchronize` / `end_synchronize` bracket each batch of calls the
///   renderer makes. Backends needing cross-thread coordination acquire and
///   release their barrier there; single-threaded backends implement them as
///   no-ops.
pub trait GpuDriver {
    type Error: std::error::Error;

    fn begin_synchronize(&mut self);
    fn end_synchronize(&mut self);

    /// Reserves the lowest unused texture id. The id is registered (empty)
    /// before this returns: it never dangles.
    fn next_texture_id(&mut self) -> Result<TextureId, Self::Error>;
    fn create_texture(&mut self, id: TextureId, bitmap: &Bitmap) -> Result<(), Self::Error>;
    fn update_texture(&mut self, id: TextureId, bitmap: &Bitmap) -> Result<(), Self::Error>;
    fn destroy_texture(&mut self, id: TextureId) -> Result<(), Self::Error>;

    /// Reserves the lowest unused geometry id.
    fn next_geometry_id(&mut self) -> Result<GeometryId, Self::Error>;
    /// Uploads a vertex/index buffer pair. The pair is always created
    /// together; there is no independent index-buffer lifetime.
    fn create_geometry(
        &mut self,
        id: GeometryId,
        vertices: &VertexBuffer,
        indices: &IndexBuffer,
    ) -> Result<(), Self::Error>;
    fn update_geometry(
        &mut self,
        id: GeometryId,
        vertices: &VertexBuffer,
        indices: &IndexBuffer,
    ) -> Result<(), Self::Error>;
    fn destroy_geometry(&mut self, id: GeometryId) -> Result<(), Self::Error>;

    /// Reserves the lowest unused render buffer id.
    fn next_render_buffer_id(&mut self) -> Result<RenderBufferId, Self::Error>;
    /// Creates an offscreen target rendering into `desc.texture`, which must
    /// already be allocated (pixel data not required yet).
    fn create_render_buffer(
        &mut self,
        id: RenderBufferId,
        desc: &RenderBufferDesc,
    ) -> Result<(), Self::Error>;
    /// Destroys the render buffer only; the referenced texture is not owned
    /// and stays alive.
    fn destroy_render_buffer(&mut self, id: RenderBufferId) -> Result<(), Self::Error>;

    /// Executes a batch of draw/clear commands against previously created
    /// resources.
    fn render_command_list(&mut self, commands: &[GpuCommand]) -> Result<(), Self::Error>;
}
