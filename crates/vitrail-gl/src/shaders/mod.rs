//! Embedded GLSL sources for the two driver programs.
//!
//! Bundled at compile time under fixed names; not user-configurable. The
//! attribute locations match the pointers set up by
//! [`crate::backend::GlBackend::bind_geometry`] implementations.

pub(crate) const FILL_PATH_VERT: &str = include_str!("fill_path.vert.glsl");
pub(crate) const FILL_PATH_FRAG: &str = include_str!("fill_path.frag.glsl");
pub(crate) const FILL_VERT: &str = include_str!("fill.vert.glsl");
pub(crate) const FILL_FRAG: &str = include_str!("fill.frag.glsl");
