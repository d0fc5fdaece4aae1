//! Strata Geometry - CPU-side geometry buffers
//!
//! This crate provides:
//! - [`GeometryBuffer`]: vertex attribute segments (position, optional
//!   normal, any number of texture channels) plus a triangle index list
//! - Insertion, append with index re-basing, and range erasure that keep
//!   segments and indices consistent
//! - Two interchangeable storage layouts ([`SplitSegments`],
//!   [`GroupedSegments`])
//! - Read-only [`GeometryView`]s and an upload seam for renderers
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use strata_geometry::*;
//!
//! let mut buffer = GeometryBuffer::with_options(
//!     VertexLayout::textured(1),
//!     BufferOptions::new().with_label("hud"),
//! );
//!
//! // Two quads; the second one's indices are re-based onto vertex 4.
//! add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE)?;
//! add_2d_rectangle(&mut buffer, Vec2::ONE, Vec2::splat(2.0), Vec2::ZERO, Vec2::ONE)?;
//!
//! assert_eq!(buffer.vertex_count(), 8);
//! assert_eq!(&buffer.indices()[6..], &[4, 5, 6, 4, 7, 5]);
//! # Ok::<(), GeometryError>(())
//! ```

// Data model
mod error;
mod layout;
mod options;
mod vertex_data;
pub mod storage;

// Buffer
mod buffer;
mod primitives;

// Rendering seam
mod render;
mod view;

// Re-exports
pub use error::*;
pub use layout::*;
pub use options::*;
pub use vertex_data::*;
pub use storage::{GroupedSegments, SegmentStorage, SplitSegments};

pub use buffer::*;
pub use primitives::*;

pub use render::*;
pub use view::*;
