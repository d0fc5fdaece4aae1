//! Helpers that author small meshes and append them to a buffer.
//!
//! Helpers write 0-based indices and rely on
//! [`GeometryBuffer::push_back`] to re-base them, so they always append.

use glam::Vec2;

use crate::buffer::GeometryBuffer;
use crate::error::{GeometryError, GeometryResult};
use crate::storage::SegmentStorage;
use crate::vertex_data::VertexData;

/// Index pattern of [`add_2d_rectangle`]: two triangles sharing the
/// `(x0, y0)`–`(x1, y1)` diagonal.
pub const RECTANGLE_INDICES: [u32; 6] = [0, 1, 2, 0, 3, 1];

/// Append an axis-aligned rectangle in the `z = 0` plane.
///
/// The buffer must have exactly one texture channel and no normals. Vertices
/// are emitted as `(x0, y0)`, `(x1, y1)`, `(x0, y1)`, `(x1, y0)` with texture
/// coordinates taken from the matching corners of `uv_min`/`uv_max`.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use strata_geometry::{GeometryBuffer, VertexLayout, add_2d_rectangle};
///
/// let mut buffer = GeometryBuffer::new(VertexLayout::textured(1));
/// add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE).unwrap();
///
/// assert_eq!(buffer.vertex_count(), 4);
/// assert_eq!(buffer.indices(), &[0, 1, 2, 0, 3, 1]);
/// ```
pub fn add_2d_rectangle<S: SegmentStorage>(
    buffer: &mut GeometryBuffer<S>,
    min: Vec2,
    max: Vec2,
    uv_min: Vec2,
    uv_max: Vec2,
) -> GeometryResult<()> {
    let channels = buffer.tex_channel_count();
    if channels != 1 {
        return Err(GeometryError::ChannelCountMismatch {
            expected: 1,
            found: channels,
        });
    }

    #[rustfmt::skip]
    let positions = [
        min.x, min.y, 0.0,
        max.x, max.y, 0.0,
        min.x, max.y, 0.0,
        max.x, min.y, 0.0,
    ];

    #[rustfmt::skip]
    let tex_coords = [
        uv_min.x, uv_min.y,
        uv_max.x, uv_max.y,
        uv_min.x, uv_max.y,
        uv_max.x, uv_min.y,
    ];
    let channels = [&tex_coords[..]];

    let data = VertexData::new(&positions).with_tex_coords(&channels);
    buffer.push_back(&data, &RECTANGLE_INDICES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryErrorKind;
    use crate::layout::{ComponentFlags, VertexLayout};

    #[test]
    fn test_unit_rectangle() {
        let mut buffer = GeometryBuffer::new(VertexLayout::textured(1));
        add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE).unwrap();

        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(
            buffer.positions(),
            &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]
        );
        assert_eq!(
            buffer.tex_coords(0),
            Some(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0][..])
        );
        assert_eq!(buffer.indices(), &RECTANGLE_INDICES);
    }

    #[test]
    fn test_requires_single_channel() {
        let mut buffer = GeometryBuffer::new(VertexLayout::textured(2));
        let err = add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE)
            .unwrap_err();
        assert_eq!(
            err,
            GeometryError::ChannelCountMismatch {
                expected: 1,
                found: 2
            }
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_rejects_layout_with_normals() {
        let layout = VertexLayout::new(ComponentFlags::NORMAL | ComponentFlags::TEXCOORD, 1);
        let mut buffer = GeometryBuffer::new(layout);
        let err = add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE)
            .unwrap_err();
        assert_eq!(err.kind(), GeometryErrorKind::NullRequiredInput);
    }
}
