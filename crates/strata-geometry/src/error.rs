//! Error types for geometry buffer operations.

use std::fmt;

use crate::layout::{Attribute, VertexLayout};

/// Errors returned by [`GeometryBuffer`](crate::GeometryBuffer) operations.
///
/// All of these are caller contract violations. A call that returns one of
/// them has not modified the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Vertex insertion point past the end of the buffer.
    VertexOutOfRange {
        /// Requested vertex position.
        index: usize,
        /// Vertices currently stored.
        vertex_count: usize,
    },

    /// Index insertion point past the end of the index list.
    IndexPositionOutOfRange {
        /// Requested position in the index list.
        position: usize,
        /// Indices currently stored.
        index_count: usize,
    },

    /// Erase range is empty, reversed, or extends past the last vertex.
    InvalidEraseRange {
        first: usize,
        last: usize,
        vertex_count: usize,
    },

    /// The operation would grow the buffer past what `u32` indices can address.
    TooManyVertices { requested: usize, max: usize },

    /// An index value does not reference an existing vertex.
    IndexOutOfRange {
        /// Position of the offending value in the supplied slice.
        position: usize,
        /// The offending value.
        value: u32,
        /// Exclusive upper bound the value had to respect.
        bound: usize,
    },

    /// Supplied texture channels differ from the layout's channel count.
    ChannelCountMismatch { expected: u32, found: u32 },

    /// A required attribute was not supplied.
    MissingAttribute { attribute: Attribute },

    /// Attribute data whose length does not match the vertex count.
    AttributeLength {
        attribute: Attribute,
        expected: usize,
        found: usize,
    },

    /// An index still references a vertex inside the range being erased.
    DanglingIndex {
        /// Position of the index in the index list.
        position: usize,
        /// The referenced vertex.
        value: u32,
        first: usize,
        last: usize,
    },

    /// Two buffers with different layouts cannot be merged.
    LayoutMismatch {
        expected: VertexLayout,
        found: VertexLayout,
    },

    /// A segment does not have the length its vertex count requires.
    CorruptedSegment {
        attribute: Attribute,
        expected: usize,
        found: usize,
    },

    /// Backing arrays hold a different number of floats than the layout and
    /// vertex count require.
    CorruptedStorage { expected: usize, found: usize },
}

/// Coarse classification of [`GeometryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryErrorKind {
    OutOfRange,
    ChannelCountMismatch,
    NullRequiredInput,
    DanglingIndexOnErase,
    LayoutMismatch,
    Corrupted,
}

impl GeometryError {
    pub fn kind(&self) -> GeometryErrorKind {
        match self {
            GeometryError::VertexOutOfRange { .. }
            | GeometryError::IndexPositionOutOfRange { .. }
            | GeometryError::InvalidEraseRange { .. }
            | GeometryError::TooManyVertices { .. }
            | GeometryError::IndexOutOfRange { .. } => GeometryErrorKind::OutOfRange,
            GeometryError::ChannelCountMismatch { .. } => GeometryErrorKind::ChannelCountMismatch,
            GeometryError::MissingAttribute { .. } | GeometryError::AttributeLength { .. } => {
                GeometryErrorKind::NullRequiredInput
            }
            GeometryError::DanglingIndex { .. } => GeometryErrorKind::DanglingIndexOnErase,
            GeometryError::LayoutMismatch { .. } => GeometryErrorKind::LayoutMismatch,
            GeometryError::CorruptedSegment { .. } | GeometryError::CorruptedStorage { .. } => {
                GeometryErrorKind::Corrupted
            }
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::VertexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "Vertex position {} out of range (vertex count: {})",
                index, vertex_count
            ),
            GeometryError::IndexPositionOutOfRange {
                position,
                index_count,
            } => write!(
                f,
                "Index position {} out of range (index count: {})",
                position, index_count
            ),
            GeometryError::InvalidEraseRange {
                first,
                last,
                vertex_count,
            } => write!(
                f,
                "Invalid erase range {}..{} (vertex count: {})",
                first, last, vertex_count
            ),
            GeometryError::TooManyVertices { requested, max } => write!(
                f,
                "Vertex count {} exceeds the maximum of {}",
                requested, max
            ),
            GeometryError::IndexOutOfRange {
                position,
                value,
                bound,
            } => write!(
                f,
                "Index value {} at position {} must be less than {}",
                value, position, bound
            ),
            GeometryError::ChannelCountMismatch { expected, found } => write!(
                f,
                "Texture channel count mismatch: expected {}, found {}",
                expected, found
            ),
            GeometryError::MissingAttribute { attribute } => {
                write!(f, "Missing required {} data", attribute)
            }
            GeometryError::AttributeLength {
                attribute,
                expected,
                found,
            } => write!(
                f,
                "Expected {} floats of {} data, found {}",
                expected, attribute, found
            ),
            GeometryError::DanglingIndex {
                position,
                value,
                first,
                last,
            } => write!(
                f,
                "Index {} at position {} references erased vertex range {}..{}",
                value, position, first, last
            ),
            GeometryError::LayoutMismatch { expected, found } => write!(
                f,
                "Layout mismatch: expected {:?}, found {:?}",
                expected, found
            ),
            GeometryError::CorruptedSegment {
                attribute,
                expected,
                found,
            } => write!(
                f,
                "Corrupted {} segment: expected {} floats, found {}",
                attribute, expected, found
            ),
            GeometryError::CorruptedStorage { expected, found } => write!(
                f,
                "Corrupted storage: expected {} floats in total, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result type for geometry buffer operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
