//! The CPU-side geometry buffer.
//!
//! [`GeometryBuffer`] stores per-vertex attribute segments alongside a
//! triangle index list and keeps the two consistent through every mutation.
//!
//! # Example
//!
//! ```
//! use strata_geometry::{GeometryBuffer, VertexData, VertexLayout};
//!
//! let mut buffer = GeometryBuffer::new(VertexLayout::position_only());
//!
//! let triangle = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//! buffer.push_back(&VertexData::new(&triangle), &[0, 1, 2]).unwrap();
//! buffer.push_back(&VertexData::new(&triangle), &[0, 1, 2]).unwrap();
//!
//! assert_eq!(buffer.vertex_count(), 6);
//! assert_eq!(buffer.indices(), &[0, 1, 2, 3, 4, 5]);
//! ```

use strata_core::profiling::profile_function;

use crate::error::{GeometryError, GeometryResult};
use crate::layout::{Attribute, VertexLayout};
use crate::options::BufferOptions;
use crate::storage::{GroupedSegments, SegmentStorage};
use crate::vertex_data::VertexData;
use crate::view::GeometryView;

/// Largest vertex count addressable by `u32` indices.
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// Whether a buffer holds any geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferState {
    /// Freshly created or cleared. Nothing to upload.
    #[default]
    NoData,
    /// Geometry has been added or edited since creation or the last clear.
    Initialized,
}

/// Growable store of vertex attributes and triangle indices.
///
/// The vertex count is the single source of truth for every segment length:
/// positions and normals hold `3 * vertex_count` floats, each texture channel
/// holds `2 * vertex_count`, and every index is `< vertex_count`. Each
/// mutating method validates its arguments before touching storage, so an
/// `Err` leaves the buffer exactly as it was.
///
/// `S` selects the physical layout of the segments; see
/// [`storage`](crate::storage).
#[derive(Debug, Clone)]
pub struct GeometryBuffer<S: SegmentStorage = GroupedSegments> {
    layout: VertexLayout,
    storage: S,
    indices: Vec<u32>,
    vertex_count: usize,
    state: BufferState,
    revision: u64,
    label: Option<String>,
}

impl GeometryBuffer<GroupedSegments> {
    /// Create an empty buffer with grouped storage.
    pub fn new(layout: VertexLayout) -> Self {
        Self::with_storage(layout, BufferOptions::default())
    }

    /// Create an empty buffer with grouped storage and `options`.
    pub fn with_options(layout: VertexLayout, options: BufferOptions) -> Self {
        Self::with_storage(layout, options)
    }
}

impl<S: SegmentStorage> GeometryBuffer<S> {
    /// Create an empty buffer backed by storage `S`.
    ///
    /// ```
    /// use strata_geometry::{BufferOptions, GeometryBuffer, SplitSegments, VertexLayout};
    ///
    /// let buffer = GeometryBuffer::<SplitSegments>::with_storage(
    ///     VertexLayout::textured(1),
    ///     BufferOptions::new().with_label("sprites").with_vertex_capacity(64),
    /// );
    /// assert!(buffer.is_empty());
    /// assert_eq!(buffer.label(), Some("sprites"));
    /// ```
    pub fn with_storage(layout: VertexLayout, options: BufferOptions) -> Self {
        let mut storage = S::with_layout(&layout);
        if options.vertex_capacity > 0 {
            storage.reserve(&layout, options.vertex_capacity);
        }

        Self {
            layout,
            storage,
            indices: Vec::with_capacity(options.index_capacity),
            vertex_count: 0,
            state: BufferState::NoData,
            revision: 0,
            label: options.label,
        }
    }

    // ===== Accessors =====

    /// Get the vertex layout.
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get the number of whole triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of texture coordinate channels.
    pub fn tex_channel_count(&self) -> u32 {
        self.layout.tex_channel_count()
    }

    /// Get whether the buffer holds geometry.
    pub fn state(&self) -> BufferState {
        self.state
    }

    /// Counter bumped by every call that changes the buffer's contents.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get the debug label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Check if the buffer has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Segment for `attribute`; empty when the layout does not store it.
    pub fn segment(&self, attribute: Attribute) -> &[f32] {
        self.storage.segment(attribute, self.vertex_count)
    }

    /// Get the position segment.
    pub fn positions(&self) -> &[f32] {
        self.segment(Attribute::Position)
    }

    /// Normal segment, empty if the layout has no normals.
    pub fn normals(&self) -> &[f32] {
        self.segment(Attribute::Normal)
    }

    /// Texture coordinates of `channel`, or `None` past the last channel.
    pub fn tex_coords(&self, channel: u32) -> Option<&[f32]> {
        (channel < self.tex_channel_count()).then(|| self.segment(Attribute::TexCoord(channel)))
    }

    /// Get the index list.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get the backing segment storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Borrow a read-only view for one upload pass.
    pub fn view(&self) -> GeometryView<'_, S> {
        GeometryView::new(self)
    }

    /// Reserve room for additional vertices and indices.
    pub fn reserve(&mut self, vertices: usize, indices: usize) {
        self.storage.reserve(&self.layout, vertices);
        self.indices.reserve(indices);
    }

    // ===== Mutation =====

    /// Insert vertices before vertex `at`, shifting later vertices up.
    ///
    /// `at` may equal [`vertex_count`](Self::vertex_count) to insert at the
    /// end. Inserting zero vertices is a no-op. Indices are left untouched:
    /// callers that need existing triangles to follow the shifted vertices
    /// must renumber them separately.
    pub fn insert_vertices(&mut self, at: usize, data: &VertexData<'_>) -> GeometryResult<()> {
        profile_function!();

        if at > self.vertex_count {
            return Err(self.reject(
                "insert_vertices",
                GeometryError::VertexOutOfRange {
                    index: at,
                    vertex_count: self.vertex_count,
                },
            ));
        }

        let count = self.validate_vertices("insert_vertices", data)?;
        if count == 0 {
            return Ok(());
        }

        self.storage
            .insert(&self.layout, self.vertex_count, at, data);
        self.vertex_count += count;
        self.mark_modified();

        tracing::trace!(
            buffer = ?self.label,
            at,
            count,
            vertex_count = self.vertex_count,
            "Inserted vertices"
        );
        Ok(())
    }

    /// Insert raw index values before position `at` of the index list.
    ///
    /// Values are stored verbatim; each must already reference an existing
    /// vertex.
    pub fn insert_indices(&mut self, at: usize, values: &[u32]) -> GeometryResult<()> {
        profile_function!();

        if at > self.indices.len() {
            return Err(self.reject(
                "insert_indices",
                GeometryError::IndexPositionOutOfRange {
                    position: at,
                    index_count: self.indices.len(),
                },
            ));
        }

        if let Err(err) = check_index_bounds(values, self.vertex_count) {
            return Err(self.reject("insert_indices", err));
        }

        self.indices.splice(at..at, values.iter().copied());
        self.mark_modified();

        tracing::trace!(
            buffer = ?self.label,
            at,
            count = values.len(),
            index_count = self.indices.len(),
            "Inserted indices"
        );
        Ok(())
    }

    /// Append a sub-mesh, re-basing its indices onto the existing vertices.
    ///
    /// `indices` are local to `data` (0-based). Each is stored as
    /// `index + vertex_count` where `vertex_count` is taken before the call.
    /// An empty sub-mesh is a no-op; any index it carries is out of range.
    pub fn push_back(&mut self, data: &VertexData<'_>, indices: &[u32]) -> GeometryResult<()> {
        profile_function!();

        let count = self.validate_vertices("push_back", data)?;
        if let Err(err) = check_index_bounds(indices, count) {
            return Err(self.reject("push_back", err));
        }
        if count == 0 {
            return Ok(());
        }

        // validate_vertices keeps the total within MAX_VERTICES
        let base = self.vertex_count as u32;

        self.storage.extend(&self.layout, self.vertex_count, data);
        self.indices.extend(indices.iter().map(|&index| index + base));
        self.vertex_count += count;
        self.mark_modified();

        tracing::trace!(
            buffer = ?self.label,
            base,
            vertices = count,
            indices = indices.len(),
            "Appended sub-mesh"
        );
        Ok(())
    }

    /// Append every vertex and index of `other`, which must share this
    /// buffer's layout. The storage types may differ.
    pub fn append<T: SegmentStorage>(&mut self, other: &GeometryBuffer<T>) -> GeometryResult<()> {
        profile_function!();

        if other.layout != self.layout {
            return Err(self.reject(
                "append",
                GeometryError::LayoutMismatch {
                    expected: self.layout,
                    found: other.layout,
                },
            ));
        }

        if other.is_empty() {
            return Ok(());
        }

        let channels: Vec<&[f32]> = (0..other.tex_channel_count())
            .map(|channel| other.segment(Attribute::TexCoord(channel)))
            .collect();
        let mut data = VertexData::new(other.positions()).with_tex_coords(&channels);
        if other.layout.has_normals() {
            data = data.with_normals(other.normals());
        }

        self.push_back(&data, other.indices())
    }

    /// Remove vertices `first..last` and shift higher indices down.
    ///
    /// Fails with [`GeometryError::DanglingIndex`] if any index still
    /// references a vertex in the range.
    pub fn erase_vertices(&mut self, first: usize, last: usize) -> GeometryResult<()> {
        profile_function!();

        if first >= last || last > self.vertex_count {
            return Err(self.reject(
                "erase_vertices",
                GeometryError::InvalidEraseRange {
                    first,
                    last,
                    vertex_count: self.vertex_count,
                },
            ));
        }

        let dangling = self
            .indices
            .iter()
            .position(|&value| (first..last).contains(&(value as usize)));
        if let Some(position) = dangling {
            return Err(self.reject(
                "erase_vertices",
                GeometryError::DanglingIndex {
                    position,
                    value: self.indices[position],
                    first,
                    last,
                },
            ));
        }

        self.storage
            .erase(&self.layout, self.vertex_count, first..last);

        let removed = last - first;
        // Ranges are bounded by vertex_count, which never exceeds MAX_VERTICES.
        let shift = removed as u32;
        for index in &mut self.indices {
            if *index as usize >= last {
                *index -= shift;
            }
        }

        self.vertex_count -= removed;
        self.mark_modified();

        tracing::trace!(
            buffer = ?self.label,
            first,
            last,
            vertex_count = self.vertex_count,
            "Erased vertices"
        );
        Ok(())
    }

    /// Drop all geometry, keeping the layout.
    pub fn clear(&mut self) {
        profile_function!();

        let had_data = self.state != BufferState::NoData || !self.indices.is_empty();

        self.storage.clear();
        self.indices.clear();
        self.vertex_count = 0;
        self.state = BufferState::NoData;

        if had_data {
            self.revision = self.revision.wrapping_add(1);
            tracing::trace!(buffer = ?self.label, "Cleared buffer");
        }
    }

    // ===== Validation =====

    /// Verify that every segment and index agrees with the vertex count.
    pub fn check_invariants(&self) -> GeometryResult<()> {
        for attribute in self.layout.attributes() {
            let expected = self.vertex_count * attribute.width();
            let found = self.segment(attribute).len();
            if found != expected {
                return Err(GeometryError::CorruptedSegment {
                    attribute,
                    expected,
                    found,
                });
            }
        }

        let expected = self.vertex_count * self.layout.floats_per_vertex();
        let found: usize = self.storage.backing_arrays().iter().map(|a| a.len()).sum();
        if found != expected {
            return Err(GeometryError::CorruptedStorage { expected, found });
        }

        check_index_bounds(&self.indices, self.vertex_count)
    }

    fn validate_vertices(&self, operation: &str, data: &VertexData<'_>) -> GeometryResult<usize> {
        let count = match data.validate(&self.layout) {
            Ok(count) => count,
            Err(err) => return Err(self.reject(operation, err)),
        };

        let requested = self.vertex_count + count;
        if requested > MAX_VERTICES {
            return Err(self.reject(
                operation,
                GeometryError::TooManyVertices {
                    requested,
                    max: MAX_VERTICES,
                },
            ));
        }

        Ok(count)
    }

    fn mark_modified(&mut self) {
        self.state = BufferState::Initialized;
        self.revision = self.revision.wrapping_add(1);

        debug_assert!(
            self.check_invariants().is_ok(),
            "geometry buffer invariants broken: {:?}",
            self.check_invariants()
        );
    }

    fn reject(&self, operation: &str, err: GeometryError) -> GeometryError {
        tracing::warn!(buffer = ?self.label, "{} rejected: {}", operation, err);
        err
    }
}

/// Check that every value in `indices` is below `bound`.
fn check_index_bounds(indices: &[u32], bound: usize) -> GeometryResult<()> {
    match indices.iter().position(|&value| value as usize >= bound) {
        Some(position) => Err(GeometryError::IndexOutOfRange {
            position,
            value: indices[position],
            bound,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryErrorKind;

    const QUAD: [f32; 12] = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, //
    ];
    const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

    fn quad_buffer() -> GeometryBuffer {
        let mut buffer = GeometryBuffer::new(VertexLayout::position_only());
        buffer
            .push_back(&VertexData::new(&QUAD), &QUAD_INDICES)
            .unwrap();
        buffer
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = GeometryBuffer::new(VertexLayout::lit_textured(2));
        assert_eq!(buffer.state(), BufferState::NoData);
        assert_eq!(buffer.vertex_count(), 0);
        assert_eq!(buffer.revision(), 0);
        assert!(buffer.positions().is_empty());
        assert!(buffer.normals().is_empty());
        assert_eq!(buffer.tex_coords(1), Some(&[][..]));
        assert_eq!(buffer.tex_coords(2), None);
        assert!(buffer.check_invariants().is_ok());
    }

    #[test]
    fn test_push_back_rebases_indices() {
        let mut buffer = quad_buffer();
        buffer
            .push_back(&VertexData::new(&QUAD), &QUAD_INDICES)
            .unwrap();

        assert_eq!(buffer.vertex_count(), 8);
        assert_eq!(buffer.triangle_count(), 4);
        assert_eq!(&buffer.indices()[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(buffer.state(), BufferState::Initialized);
    }

    #[test]
    fn test_push_back_rejects_index_outside_sub_mesh() {
        let mut buffer = quad_buffer();
        let err = buffer
            .push_back(&VertexData::new(&QUAD), &[0, 1, 4])
            .unwrap_err();

        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                position: 2,
                value: 4,
                bound: 4,
            }
        );
        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.index_count(), 6);
    }

    #[test]
    fn test_insert_vertices_leaves_indices_alone() {
        let mut buffer = quad_buffer();
        let extra = [5.0, 5.0, 5.0];
        buffer
            .insert_vertices(1, &VertexData::new(&extra))
            .unwrap();

        assert_eq!(buffer.vertex_count(), 5);
        assert_eq!(&buffer.positions()[3..6], &extra);
        assert_eq!(buffer.indices(), &QUAD_INDICES);
    }

    #[test]
    fn test_insert_vertices_out_of_range() {
        let mut buffer = quad_buffer();
        let revision = buffer.revision();
        let err = buffer
            .insert_vertices(5, &VertexData::new(&[0.0, 0.0, 0.0]))
            .unwrap_err();

        assert_eq!(err.kind(), GeometryErrorKind::OutOfRange);
        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.revision(), revision);
    }

    #[test]
    fn test_insert_indices_checks_values() {
        let mut buffer = quad_buffer();

        buffer.insert_indices(0, &[3, 2, 1]).unwrap();
        assert_eq!(&buffer.indices()[..3], &[3, 2, 1]);

        let err = buffer.insert_indices(0, &[4]).unwrap_err();
        assert_eq!(err.kind(), GeometryErrorKind::OutOfRange);

        let err = buffer.insert_indices(10, &[0]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::IndexPositionOutOfRange {
                position: 10,
                index_count: 9,
            }
        );
    }

    #[test]
    fn test_erase_unreferenced_vertices_shifts_indices() {
        let mut buffer = GeometryBuffer::new(VertexLayout::position_only());
        let loose = [9.0; 6];
        buffer.push_back(&VertexData::new(&loose), &[]).unwrap();
        buffer
            .push_back(&VertexData::new(&QUAD), &QUAD_INDICES)
            .unwrap();
        assert_eq!(buffer.indices(), &[2, 3, 4, 2, 4, 5]);

        buffer.erase_vertices(0, 2).unwrap();

        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.positions(), &QUAD);
        assert_eq!(buffer.indices(), &QUAD_INDICES);
    }

    #[test]
    fn test_erase_referenced_vertex_fails() {
        let mut buffer = quad_buffer();
        let err = buffer.erase_vertices(1, 2).unwrap_err();

        assert_eq!(
            err,
            GeometryError::DanglingIndex {
                position: 1,
                value: 1,
                first: 1,
                last: 2,
            }
        );
        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.positions(), &QUAD);
    }

    #[test]
    fn test_erase_invalid_ranges() {
        let mut buffer = quad_buffer();
        for (first, last) in [(2, 2), (3, 1), (0, 5)] {
            let err = buffer.erase_vertices(first, last).unwrap_err();
            assert_eq!(err.kind(), GeometryErrorKind::OutOfRange);
        }
        assert_eq!(buffer.vertex_count(), 4);
    }

    #[test]
    fn test_clear_keeps_layout() {
        let mut buffer = GeometryBuffer::new(VertexLayout::textured(1));
        let uvs = [0.0; 8];
        let channels = [&uvs[..]];
        buffer
            .push_back(
                &VertexData::new(&QUAD).with_tex_coords(&channels),
                &QUAD_INDICES,
            )
            .unwrap();

        buffer.clear();
        let revision = buffer.revision();
        buffer.clear();

        assert_eq!(buffer.state(), BufferState::NoData);
        assert_eq!(buffer.vertex_count(), 0);
        assert_eq!(buffer.index_count(), 0);
        assert_eq!(buffer.tex_channel_count(), 1);
        assert_eq!(buffer.revision(), revision);
    }

    #[test]
    fn test_append_other_buffer() {
        let mut target = quad_buffer();
        let source = quad_buffer();
        target.append(&source).unwrap();

        assert_eq!(target.vertex_count(), 8);
        assert_eq!(&target.indices()[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_append_layout_mismatch() {
        let mut target = quad_buffer();
        let source = GeometryBuffer::new(VertexLayout::position_normal());
        let err = target.append(&source).unwrap_err();
        assert_eq!(err.kind(), GeometryErrorKind::LayoutMismatch);
    }
}
