//! Read-only access for rendering collaborators.

use crate::buffer::{BufferState, GeometryBuffer};
use crate::layout::{Attribute, VertexLayout};
use crate::storage::{GroupedSegments, SegmentStorage};

/// A borrowed, read-only snapshot of a [`GeometryBuffer`].
///
/// Renderers take one of these per upload pass. Holding it keeps the buffer
/// immutable, so geometry construction and rendering cannot interleave.
#[derive(Debug)]
pub struct GeometryView<'a, S: SegmentStorage = GroupedSegments> {
    buffer: &'a GeometryBuffer<S>,
}

impl<S: SegmentStorage> Clone for GeometryView<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: SegmentStorage> Copy for GeometryView<'_, S> {}

impl<'a, S: SegmentStorage> GeometryView<'a, S> {
    /// Create a view over `buffer`.
    pub fn new(buffer: &'a GeometryBuffer<S>) -> Self {
        Self { buffer }
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &'a VertexLayout {
        self.buffer.layout()
    }

    /// Get whether the buffer holds geometry.
    pub fn state(&self) -> BufferState {
        self.buffer.state()
    }

    /// Get the buffer revision this view reflects.
    pub fn revision(&self) -> u64 {
        self.buffer.revision()
    }

    /// Get the buffer's debug label, if any.
    pub fn label(&self) -> Option<&'a str> {
        self.buffer.label()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.buffer.vertex_count()
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> usize {
        self.buffer.index_count()
    }

    /// `true` when the buffer has geometry worth uploading.
    pub fn has_data(&self) -> bool {
        self.state() == BufferState::Initialized && self.vertex_count() > 0
    }

    /// Get the segment for `attribute`, empty if the layout lacks it.
    pub fn segment(&self, attribute: Attribute) -> &'a [f32] {
        self.buffer.segment(attribute)
    }

    /// Get the position segment.
    pub fn positions(&self) -> &'a [f32] {
        self.buffer.positions()
    }

    /// Get the normal segment, empty without normals.
    pub fn normals(&self) -> &'a [f32] {
        self.buffer.normals()
    }

    /// Get texture channel `channel`, or `None` past the last channel.
    pub fn tex_coords(&self, channel: u32) -> Option<&'a [f32]> {
        self.buffer.tex_coords(channel)
    }

    /// Get the index list.
    pub fn indices(&self) -> &'a [u32] {
        self.buffer.indices()
    }

    /// Every enabled attribute with its segment, in storage order.
    pub fn segments(&self) -> impl Iterator<Item = (Attribute, &'a [f32])> + 'a {
        let buffer = self.buffer;
        buffer
            .layout()
            .attributes()
            .map(move |attribute| (attribute, buffer.segment(attribute)))
    }

    /// Segment bytes, ready for a GPU copy.
    pub fn segment_bytes(&self, attribute: Attribute) -> &'a [u8] {
        bytemuck::cast_slice(self.segment(attribute))
    }

    /// Index list bytes, ready for a GPU copy.
    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices())
    }

    /// Raw storage arrays in their native grouping.
    pub fn backing_arrays(&self) -> Vec<&'a [f32]> {
        self.buffer.storage().backing_arrays()
    }
}
