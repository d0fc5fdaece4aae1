//! Physical storage of attribute segments.
//!
//! The logical model is one float segment per attribute, each sized from the
//! buffer's vertex count. [`SegmentStorage`] hides how those segments are laid
//! out in memory:
//!
//! - [`SplitSegments`] keeps one array per attribute.
//! - [`GroupedSegments`] packs positions and normals into one "dynamic" array
//!   and every texture channel into one "static" array, which uploads as two
//!   large buffers.
//!
//! Storage never tracks the vertex count itself. The owning buffer passes the
//! count *before* the mutation into every call and is responsible for
//! validating arguments first.

mod grouped;
mod split;

use std::ops::Range;

use crate::layout::{Attribute, VertexLayout};
use crate::vertex_data::VertexData;

pub use grouped::GroupedSegments;
pub use split::SplitSegments;

/// Backing store for the attribute segments of a geometry buffer.
pub trait SegmentStorage: std::fmt::Debug + Clone {
    /// Create empty storage for `layout`.
    fn with_layout(layout: &VertexLayout) -> Self;

    /// Reserve room for `additional` more vertices.
    fn reserve(&mut self, layout: &VertexLayout, additional: usize);

    /// The segment for `attribute`. Empty if the layout does not store it.
    fn segment(&self, attribute: Attribute, vertex_count: usize) -> &[f32];

    /// Splice `data` into every enabled segment before vertex `at`.
    fn insert(&mut self, layout: &VertexLayout, vertex_count: usize, at: usize, data: &VertexData<'_>);

    /// Add `data` after the last vertex of every enabled segment.
    fn extend(&mut self, layout: &VertexLayout, vertex_count: usize, data: &VertexData<'_>) {
        self.insert(layout, vertex_count, vertex_count, data);
    }

    /// Remove the vertices in `range` from every enabled segment.
    fn erase(&mut self, layout: &VertexLayout, vertex_count: usize, range: Range<usize>);

    /// Drop every vertex.
    fn clear(&mut self);

    /// The raw arrays in their native grouping, for bulk upload.
    fn backing_arrays(&self) -> Vec<&[f32]>;
}

/// Float range of vertices `range` within a segment of `width`-float vertices
/// that starts at `base`.
#[inline]
pub(crate) fn float_range(base: usize, width: usize, range: Range<usize>) -> Range<usize> {
    base + range.start * width..base + range.end * width
}
