use bytemuck::{Pod, Zeroable};

/// Vertex layout of a [`VertexBuffer`].
///
/// The embedded renderer emits exactly two layouts. Strides are fixed by the
/// `#[repr(C)]` vertex structs below; backends hard-code matching attribute
/// pointers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexBufferFormat {
    /// `position(2f) color(4ub) uv(2f)`, 20 bytes. Used for path coverage
    /// geometry.
    Pos2Color4Uv2,
    /// `position(2f) color(4ub) uv(2f) object(2f) data[7](4f each)`,
    /// 140 bytes. Used for general fill geometry.
    Pos2Color4Uv2Obj2Data28,
}

impl VertexBufferFormat {
    /// Byte stride of one vertex in this layout.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            Self::Pos2Color4Uv2 => core::mem::size_of::<PathVertex>(),
            Self::Pos2Color4Uv2Obj2Data28 => core::mem::size_of::<FillVertex>(),
        }
    }
}

/// Vertex of the path coverage layout ([`VertexBufferFormat::Pos2Color4Uv2`]).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PathVertex {
    pub position: [f32; 2],
    pub color: [u8; 4],
    pub uv: [f32; 2],
}

/// Vertex of the general fill layout
/// ([`VertexBufferFormat::Pos2Color4Uv2Obj2Data28`]).
///
/// The seven `data` vectors carry per-primitive shading parameters
/// (gradients, rounded-rect metrics, ...) whose interpretation belongs to the
/// shaders, not to the driver.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FillVertex {
    pub position: [f32; 2],
    pub color: [u8; 4],
    pub uv: [f32; 2],
    pub object: [f32; 2],
    pub data: [[f32; 4]; 7],
}

/// Raw vertex data in one of the two renderer layouts.
///
/// Data is carried as bytes because it crosses the engine boundary that way;
/// the typed constructors are for embedders and tests that build geometry
/// natively.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    pub format: VertexBufferFormat,
    pub data: Vec<u8>,
}

impl VertexBuffer {
    pub fn from_path_vertices(vertices: &[PathVertex]) -> Self {
        Self {
            format: VertexBufferFormat::Pos2Color4Uv2,
            data: bytemuck::cast_slice(vertices).to_vec(),
        }
    }

    pub fn from_fill_vertices(vertices: &[FillVertex]) -> Self {
        Self {
            format: VertexBufferFormat::Pos2Color4Uv2Obj2Data28,
            data: bytemuck::cast_slice(vertices).to_vec(),
        }
    }

    /// Number of whole vertices contained in `data`.
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.format.stride()
    }
}

/// 32-bit index data accompanying a [`VertexBuffer`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndexBuffer {
    pub data: Vec<u32>,
}

impl IndexBuffer {
    pub fn new(data: Vec<u32>) -> Self {
        Self { data }
    }
}
