//! Engine-facing GPU driver contract for **Vitrail**.
//!
//! An embedded web-view renderer produces abstract drawing work: it asks the
//! driver for fresh resource ids, uploads pixel and geometry data under those
//! ids, and submits command lists referencing them. This crate defines that
//! contract; backend crates (e.g. `vitrail-gl`) implement it against a real
//! graphics API.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`id`] | `TextureId`, `GeometryId`, `RenderBufferId` |
//! | [`bitmap`] | `Bitmap`, `BitmapFormat` |
//! | [`geometry`] | `VertexBuffer`, `IndexBuffer`, vertex layouts |
//! | [`render_buffer`] | `RenderBufferDesc` |
//! | [`command`] | `GpuCommand`, `GpuState`, `ShaderKind` |
//! | [`driver`] | the `GpuDriver` trait |

pub mod bitmap;
pub mod command;
pub mod driver;
pub mod geometry;
pub mod id;
pub mod render_buffer;

pub use bitmap::{Bitmap, BitmapFormat};
pub use command::{GpuCommand, GpuState, ShaderKind};
pub use driver::GpuDriver;
pub use geometry::{FillVertex, IndexBuffer, PathVertex, VertexBuffer, VertexBufferFormat};
pub use id::{GeometryId, RenderBufferId, TextureId};
pub use render_buffer::RenderBufferDesc;
