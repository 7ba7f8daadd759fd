//! OpenGL implementation of the Vitrail GPU driver contract.
//!
//! The embedded web-view renderer talks to a [`vitrail_api::GpuDriver`];
//! this crate implements that contract against OpenGL. It owns:
//! - the two shader programs (path coverage + general fill), built once at
//!   construction,
//! - three id-keyed resource tables (textures, geometry buffer pairs, render
//!   buffers) with first-fit id allocation,
//! - translation of submitted command lists into GL draw calls.
//!
//! The GL surface itself is consumed through the narrow [`GlBackend`] trait,
//! injected at construction. [`GlowBackend`] is the production
//! implementation over a [`glow::Context`]; tests run the full driver
//! against a scripted in-memory backend.
//!
//! All driver calls must come from the thread owning the GL context.

pub mod backend;
pub mod driver;
pub mod error;
pub mod logging;
pub mod program;

mod resources;
mod shaders;

pub use backend::{GlBackend, GlowBackend, ShaderStage};
pub use driver::GlDriver;
pub use error::{DriverError, ResourceKind};
pub use program::ShaderProgram;

#[cfg(test)]
mod tests;
