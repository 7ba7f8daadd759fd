use core::fmt;

use thiserror::Error;

use crate::backend::ShaderStage;

/// Resource namespace a table error refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    Texture,
    Geometry,
    RenderBuffer,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Texture => f.write_str("texture"),
            Self::Geometry => f.write_str("geometry"),
            Self::RenderBuffer => f.write_str("render buffer"),
        }
    }
}

/// Errors surfaced by the GL driver.
///
/// `Compile` and `Link` abort driver construction; there is never a
/// partially-constructed driver. `UnknownId` means the embedding referenced
/// an id it never obtained from the allocator, already destroyed, or whose
/// backing objects were never created. The driver is the sole source of ids,
/// so this is a contract violation on the embedding's side and should be
/// treated as fatal: continuing would silently corrupt the id/resource
/// correspondence.
#[derive(Debug, PartialEq, Error)]
pub enum DriverError {
    /// The GL driver reported diagnostics for a shader. Any non-whitespace
    /// log output is treated as a failed compile, even when the driver also
    /// reports success.
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// Program linking reported failure.
    #[error("shader program failed to link: {log}")]
    Link { log: String },

    /// The embedding referenced an id with no live, populated record.
    #[error("unknown {kind} id {id}")]
    UnknownId { kind: ResourceKind, id: u32 },

    /// Every representable id in the namespace is in use. Practically
    /// unreachable, but allocation must not wrap silently.
    #[error("{kind} id namespace exhausted")]
    ExhaustedNamespace { kind: ResourceKind },

    /// A GL object-creation call failed.
    #[error("backend call {call} failed: {detail}")]
    Backend { call: &'static str, detail: String },
}

impl DriverError {
    pub(crate) fn backend(call: &'static str, detail: String) -> Self {
        Self::Backend { call, detail }
    }
}
