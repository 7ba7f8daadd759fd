//! Id-keyed resource tables.
//!
//! One table per namespace (textures, geometry buffer pairs, render
//! buffers). Tables own the backend objects stored in their records; the
//! driver is responsible for deleting those objects when records are removed
//! or the driver is dropped.

use std::collections::HashMap;

use vitrail_api::{TextureId, VertexBufferFormat};

use crate::backend::GlBackend;
use crate::error::{DriverError, ResourceKind};

/// Mapping from id to record for one resource namespace.
///
/// Allocation is first-fit: the lowest id not currently in use, so ids freed
/// by a remove are reused instead of growing without bound. The scan is O(n)
/// in live records, which is fine because allocation happens on resource
/// creation, not per draw. Allocation registers an empty record before the
/// id is returned, so a handed-out id always resolves.
pub(crate) struct ResourceTable<R> {
    kind: ResourceKind,
    entries: HashMap<u32, R>,
}

impl<R: Default> ResourceTable<R> {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Reserves the lowest unused id and registers an empty record under it.
    pub fn allocate(&mut self) -> Result<u32, DriverError> {
        for id in 0..=u32::MAX {
            if !self.entries.contains_key(&id) {
                self.entries.insert(id, R::default());
                return Ok(id);
            }
        }
        Err(DriverError::ExhaustedNamespace { kind: self.kind })
    }

    pub fn get(&self, id: u32) -> Result<&R, DriverError> {
        self.entries
            .get(&id)
            .ok_or(DriverError::UnknownId { kind: self.kind, id })
    }

    pub fn get_mut(&mut self, id: u32) -> Result<&mut R, DriverError> {
        self.entries
            .get_mut(&id)
            .ok_or(DriverError::UnknownId { kind: self.kind, id })
    }

    /// Removes the record; the id becomes eligible for a future allocation.
    /// Ids are not versioned or tombstoned, so callers must not retain an id
    /// across a remove.
    pub fn remove(&mut self, id: u32) -> Result<R, DriverError> {
        self.entries
            .remove(&id)
            .ok_or(DriverError::UnknownId { kind: self.kind, id })
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (u32, R)> + '_ {
        self.entries.drain()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Backend texture for one texture id. Empty until the embedding uploads
/// pixel data (or a render buffer forces storage allocation).
pub(crate) struct TextureRecord<B: GlBackend> {
    pub texture: Option<B::Texture>,
}

impl<B: GlBackend> Default for TextureRecord<B> {
    fn default() -> Self {
        Self { texture: None }
    }
}

/// Vertex/index buffer pair for one geometry id. The two buffers are created
/// and destroyed together, never independently.
pub(crate) struct GeometryRecord<B: GlBackend> {
    pub buffers: Option<GeometryBuffers<B>>,
}

pub(crate) struct GeometryBuffers<B: GlBackend> {
    pub vertex_buffer: B::Buffer,
    pub index_buffer: B::Buffer,
    pub format: VertexBufferFormat,
}

impl<B: GlBackend> Clone for GeometryBuffers<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: GlBackend> Copy for GeometryBuffers<B> {}

impl<B: GlBackend> Default for GeometryRecord<B> {
    fn default() -> Self {
        Self { buffers: None }
    }
}

/// Framebuffer for one render buffer id, plus the id of the texture it
/// renders into. The texture is referenced, never owned: destroying the
/// render buffer must not touch the texture's lifetime.
pub(crate) struct RenderBufferRecord<B: GlBackend> {
    pub framebuffer: Option<B::Framebuffer>,
    pub texture: Option<TextureId>,
}

impl<B: GlBackend> Default for RenderBufferRecord<B> {
    fn default() -> Self {
        Self {
            framebuffer: None,
            texture: None,
        }
    }
}
