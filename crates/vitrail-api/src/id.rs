use core::fmt;

/// Identifier for a texture owned by the driver.
///
/// Ids are handed out by the driver (`next_texture_id`) and are only
/// meaningful within the driver instance that issued them. Each resource kind
/// has its own namespace, so a `TextureId` and a `GeometryId` with the same
/// numeric value refer to unrelated resources.
///
/// A destroyed id may be reissued by a later allocation; callers must not
/// retain ids across a destroy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Identifier for a vertex/index buffer pair owned by the driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub u32);

/// Identifier for a render buffer (offscreen render target) owned by the
/// driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RenderBufferId(pub u32);

impl TextureId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl GeometryId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl RenderBufferId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

impl fmt::Display for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geometry#{}", self.0)
    }
}

impl fmt::Display for RenderBufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render_buffer#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_namespace_prefix() {
        assert_eq!(TextureId(3).to_string(), "texture#3");
        assert_eq!(GeometryId(0).to_string(), "geometry#0");
        assert_eq!(RenderBufferId(12).to_string(), "render_buffer#12");
    }

    #[test]
    fn raw_round_trips() {
        assert_eq!(TextureId(7).raw(), 7);
    }
}
