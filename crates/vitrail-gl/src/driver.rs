//! The driver facade: implements [`GpuDriver`] over a [`GlBackend`].

use vitrail_api::{
    Bitmap, GeometryId, GpuCommand, GpuDriver, GpuState, IndexBuffer, RenderBufferDesc,
    RenderBufferId, ShaderKind, TextureId, VertexBuffer,
};

use crate::backend::GlBackend;
use crate::error::{DriverError, ResourceKind};
use crate::program::{ShaderProgram, build_program};
use crate::resources::{
    GeometryBuffers, GeometryRecord, RenderBufferRecord, ResourceTable, TextureRecord,
};
use crate::shaders;

/// GL GPU driver for an embedded web-view renderer.
///
/// Owns the two shader programs and the three resource tables; the backend
/// context itself is injected and not owned beyond use. One driver instance
/// per GL context, driven from the context's thread only.
///
/// `Drop` deletes every live backend object (programs, textures, buffer
/// pairs, framebuffers), so tearing the driver down leaks nothing as long as
/// the context is still current.
pub struct GlDriver<B: GlBackend> {
    backend: B,
    path_program: ShaderProgram<B>,
    fill_program: ShaderProgram<B>,
    textures: ResourceTable<TextureRecord<B>>,
    geometries: ResourceTable<GeometryRecord<B>>,
    render_buffers: ResourceTable<RenderBufferRecord<B>>,
}

impl<B: GlBackend> GlDriver<B> {
    /// Builds both shader programs and an empty resource table set.
    ///
    /// Fails if either program fails to compile or link; no
    /// partially-constructed driver is ever returned.
    pub fn new(backend: B) -> Result<Self, DriverError> {
        let path_program =
            build_program(&backend, shaders::FILL_PATH_VERT, shaders::FILL_PATH_FRAG)?;
        let fill_program = build_program(&backend, shaders::FILL_VERT, shaders::FILL_FRAG)?;

        // The fill program samples two fixed units; bind its sampler
        // uniforms once up front.
        backend.use_program(Some(fill_program.program));
        backend.set_uniform_sampler(fill_program.program, "u_texture0", 0);
        backend.set_uniform_sampler(fill_program.program, "u_texture1", 1);
        backend.use_program(None);

        log::debug!("GlDriver: shader programs built");

        Ok(Self {
            backend,
            path_program,
            fill_program,
            textures: ResourceTable::new(ResourceKind::Texture),
            geometries: ResourceTable::new(ResourceKind::Geometry),
            render_buffers: ResourceTable::new(ResourceKind::RenderBuffer),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn path_program(&self) -> &ShaderProgram<B> {
        &self.path_program
    }

    pub fn fill_program(&self) -> &ShaderProgram<B> {
        &self.fill_program
    }

    /// Live resource counts `(textures, geometries, render_buffers)`,
    /// counting allocated-but-empty records too.
    pub fn resource_counts(&self) -> (usize, usize, usize) {
        (
            self.textures.len(),
            self.geometries.len(),
            self.render_buffers.len(),
        )
    }

    fn upload_texture_data(&mut self, id: TextureId, bitmap: &Bitmap) -> Result<(), DriverError> {
        let record = self.textures.get_mut(id.raw())?;
        let texture = match record.texture {
            Some(texture) => texture,
            None => {
                let texture = self
                    .backend
                    .create_texture()
                    .map_err(|detail| DriverError::backend("create_texture", detail))?;
                record.texture = Some(texture);
                texture
            }
        };
        self.backend.upload_texture(texture, bitmap);
        log::trace!(
            "{id}: uploaded {}x{} {}",
            bitmap.width,
            bitmap.height,
            bitmap.format
        );
        Ok(())
    }

    fn upload_geometry_data(
        &mut self,
        id: GeometryId,
        vertices: &VertexBuffer,
        indices: &IndexBuffer,
    ) -> Result<(), DriverError> {
        let record = self.geometries.get_mut(id.raw())?;
        let buffers = match record.buffers {
            Some(mut buffers) => {
                buffers.format = vertices.format;
                record.buffers = Some(buffers);
                buffers
            }
            None => {
                let vertex_buffer = self
                    .backend
                    .create_buffer()
                    .map_err(|detail| DriverError::backend("create_buffer", detail))?;
                let index_buffer = match self.backend.create_buffer() {
                    Ok(buffer) => buffer,
                    Err(detail) => {
                        // The pair is created together or not at all.
                        self.backend.delete_buffer(vertex_buffer);
                        return Err(DriverError::backend("create_buffer", detail));
                    }
                };
                let buffers = GeometryBuffers {
                    vertex_buffer,
                    index_buffer,
                    format: vertices.format,
                };
                record.buffers = Some(buffers);
                buffers
            }
        };
        self.backend.upload_vertices(buffers.vertex_buffer, &vertices.data);
        self.backend.upload_indices(buffers.index_buffer, &indices.data);
        log::trace!(
            "{id}: uploaded {} vertices, {} indices",
            vertices.vertex_count(),
            indices.data.len()
        );
        Ok(())
    }

    fn framebuffer_for(&self, id: RenderBufferId) -> Result<B::Framebuffer, DriverError> {
        self.render_buffers
            .get(id.raw())?
            .framebuffer
            .ok_or(DriverError::UnknownId {
                kind: ResourceKind::RenderBuffer,
                id: id.raw(),
            })
    }

    fn texture_for(&self, id: TextureId) -> Result<B::Texture, DriverError> {
        self.textures
            .get(id.raw())?
            .texture
            .ok_or(DriverError::UnknownId {
                kind: ResourceKind::Texture,
                id: id.raw(),
            })
    }

    fn clear_render_buffer(&mut self, id: RenderBufferId) -> Result<(), DriverError> {
        let framebuffer = self.framebuffer_for(id)?;
        self.backend.bind_framebuffer(Some(framebuffer));
        self.backend.clear();
        Ok(())
    }

    fn draw_geometry(
        &mut self,
        id: GeometryId,
        indices_count: u32,
        indices_offset: u32,
        state: &GpuState,
    ) -> Result<(), DriverError> {
        let framebuffer = self.framebuffer_for(state.render_buffer)?;
        let buffers = self
            .geometries
            .get(id.raw())?
            .buffers
            .ok_or(DriverError::UnknownId {
                kind: ResourceKind::Geometry,
                id: id.raw(),
            })?;
        let program = match state.shader {
            ShaderKind::Fill => self.fill_program.program,
            ShaderKind::FillPath => self.path_program.program,
        };

        self.backend.bind_framebuffer(Some(framebuffer));
        self.backend
            .set_viewport(state.viewport_width, state.viewport_height);
        self.backend.use_program(Some(program));
        self.backend
            .set_uniform_matrix(program, "u_transform", &state.transform);
        self.backend.set_blend(state.enable_blend);
        self.backend
            .set_scissor(state.enable_scissor.then_some(state.scissor_rect));

        for (unit, texture_id) in [(0, state.texture_1), (1, state.texture_2)] {
            match texture_id {
                Some(texture_id) => {
                    let texture = self.texture_for(texture_id)?;
                    self.backend.bind_texture(unit, Some(texture));
                }
                None => self.backend.bind_texture(unit, None),
            }
        }

        self.backend
            .bind_geometry(buffers.vertex_buffer, buffers.format, buffers.index_buffer);
        self.backend.draw_indexed(indices_count, indices_offset);
        Ok(())
    }
}

impl<B: GlBackend> GpuDriver for GlDriver<B> {
    type Error = DriverError;

    // This backend issues GL calls synchronously from the context thread, so
    // the batch brackets need no barrier.
    fn begin_synchronize(&mut self) {}
    fn end_synchronize(&mut self) {}

    fn next_texture_id(&mut self) -> Result<TextureId, DriverError> {
        let id = TextureId(self.textures.allocate()?);
        log::trace!("allocated {id}");
        Ok(id)
    }

    fn create_texture(&mut self, id: TextureId, bitmap: &Bitmap) -> Result<(), DriverError> {
        self.upload_texture_data(id, bitmap)
    }

    fn update_texture(&mut self, id: TextureId, bitmap: &Bitmap) -> Result<(), DriverError> {
        self.upload_texture_data(id, bitmap)
    }

    fn destroy_texture(&mut self, id: TextureId) -> Result<(), DriverError> {
        let record = self.textures.remove(id.raw())?;
        if let Some(texture) = record.texture {
            self.backend.delete_texture(texture);
        }
        log::trace!("destroyed {id}");
        Ok(())
    }

    fn next_geometry_id(&mut self) -> Result<GeometryId, DriverError> {
        let id = GeometryId(self.geometries.allocate()?);
        log::trace!("allocated {id}");
        Ok(id)
    }

    fn create_geometry(
        &mut self,
        id: GeometryId,
        vertices: &VertexBuffer,
        indices: &IndexBuffer,
    ) -> Result<(), DriverError> {
        self.upload_geometry_data(id, vertices, indices)
    }

    fn update_geometry(
        &mut self,
        id: GeometryId,
        vertices: &VertexBuffer,
        indices: &IndexBuffer,
    ) -> Result<(), DriverError> {
        self.upload_geometry_data(id, vertices, indices)
    }

    fn destroy_geometry(&mut self, id: GeometryId) -> Result<(), DriverError> {
        let record = self.geometries.remove(id.raw())?;
        if let Some(buffers) = record.buffers {
            self.backend.delete_buffer(buffers.vertex_buffer);
            self.backend.delete_buffer(buffers.index_buffer);
        }
        log::trace!("destroyed {id}");
        Ok(())
    }

    fn next_render_buffer_id(&mut self) -> Result<RenderBufferId, DriverError> {
        let id = RenderBufferId(self.render_buffers.allocate()?);
        log::trace!("allocated {id}");
        Ok(id)
    }

    fn create_render_buffer(
        &mut self,
        id: RenderBufferId,
        desc: &RenderBufferDesc,
    ) -> Result<(), DriverError> {
        // Validate both ids before creating any GL object; a bad reference
        // must never leave a dangling attachment behind.
        self.render_buffers.get(id.raw())?;
        let record = self.textures.get_mut(desc.texture.raw())?;
        let texture = match record.texture {
            Some(texture) => texture,
            None => {
                // Allocated but not yet uploaded: this target is rendered
                // into first, so give it storage now.
                let texture = self
                    .backend
                    .create_texture()
                    .map_err(|detail| DriverError::backend("create_texture", detail))?;
                self.backend
                    .allocate_texture_storage(texture, desc.width, desc.height);
                record.texture = Some(texture);
                texture
            }
        };

        let framebuffer = self
            .backend
            .create_framebuffer(texture)
            .map_err(|detail| DriverError::backend("create_framebuffer", detail))?;

        let record = self.render_buffers.get_mut(id.raw())?;
        if let Some(old) = record.framebuffer.replace(framebuffer) {
            self.backend.delete_framebuffer(old);
        }
        record.texture = Some(desc.texture);
        log::trace!("{id}: framebuffer targeting {}", desc.texture);
        Ok(())
    }

    fn destroy_render_buffer(&mut self, id: RenderBufferId) -> Result<(), DriverError> {
        let record = self.render_buffers.remove(id.raw())?;
        // The referenced texture is not owned; leave it alone.
        if let Some(framebuffer) = record.framebuffer {
            self.backend.delete_framebuffer(framebuffer);
        }
        match record.texture {
            Some(texture) => log::trace!("destroyed {id} (was targeting {texture})"),
            None => log::trace!("destroyed {id}"),
        }
        Ok(())
    }

    fn render_command_list(&mut self, commands: &[GpuCommand]) -> Result<(), DriverError> {
        log::debug!("rendering command list of {} commands", commands.len());
        for command in commands {
            match command {
                GpuCommand::ClearRenderBuffer { render_buffer } => {
                    self.clear_render_buffer(*render_buffer)?;
                }
                GpuCommand::DrawGeometry {
                    geometry,
                    indices_count,
                    indices_offset,
                    state,
                } => {
                    self.draw_geometry(*geometry, *indices_count, *indices_offset, state)?;
                }
            }
        }
        self.backend.bind_framebuffer(None);
        self.backend.use_program(None);
        Ok(())
    }
}

impl<B: GlBackend> Drop for GlDriver<B> {
    fn drop(&mut self) {
        for (_, record) in self.textures.drain() {
            if let Some(texture) = record.texture {
                self.backend.delete_texture(texture);
            }
        }
        for (_, record) in self.geometries.drain() {
            if let Some(buffers) = record.buffers {
                self.backend.delete_buffer(buffers.vertex_buffer);
                self.backend.delete_buffer(buffers.index_buffer);
            }
        }
        for (_, record) in self.render_buffers.drain() {
            if let Some(framebuffer) = record.framebuffer {
                self.backend.delete_framebuffer(framebuffer);
            }
        }
        self.backend.delete_program(self.path_program.program);
        self.backend.delete_program(self.fill_program.program);
    }
}
