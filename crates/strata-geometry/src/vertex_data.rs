//! Borrowed vertex attribute input.

use crate::error::{GeometryError, GeometryResult};
use crate::layout::{Attribute, NORMAL_WIDTH, POSITION_WIDTH, TEXCOORD_WIDTH, VertexLayout};

/// Vertex attributes handed to [`GeometryBuffer`](crate::GeometryBuffer)
/// insertion and append operations.
///
/// Every slice is vertex-major: `[x0, y0, z0, x1, y1, z1, ...]` for positions
/// and normals, `[s0, t0, s1, t1, ...]` for each texture channel. The vertex
/// count is derived from the position slice; an empty slice is a valid
/// zero-vertex batch. Normals are the only attribute that can be absent.
///
/// # Example
///
/// ```
/// use strata_geometry::VertexData;
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let uvs = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
/// let channels = [&uvs[..]];
///
/// let data = VertexData::new(&positions).with_tex_coords(&channels);
/// assert_eq!(data.vertex_count(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexData<'a> {
    positions: &'a [f32],
    normals: Option<&'a [f32]>,
    tex_coords: &'a [&'a [f32]],
}

impl<'a> VertexData<'a> {
    pub fn new(positions: &'a [f32]) -> Self {
        Self {
            positions,
            normals: None,
            tex_coords: &[],
        }
    }

    pub fn with_normals(mut self, normals: &'a [f32]) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Set one slice per texture channel, in channel order.
    pub fn with_tex_coords(mut self, tex_coords: &'a [&'a [f32]]) -> Self {
        self.tex_coords = tex_coords;
        self
    }

    /// Number of whole vertices described by the position data.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_WIDTH
    }

    pub fn positions(&self) -> &'a [f32] {
        self.positions
    }

    pub fn normals(&self) -> Option<&'a [f32]> {
        self.normals
    }

    pub fn tex_channel_count(&self) -> usize {
        self.tex_coords.len()
    }

    /// Data supplied for `attribute`, or an empty slice if none was given.
    pub fn attribute(&self, attribute: Attribute) -> &'a [f32] {
        match attribute {
            Attribute::Position => self.positions,
            Attribute::Normal => self.normals.unwrap_or(&[]),
            Attribute::TexCoord(channel) => self
                .tex_coords
                .get(channel as usize)
                .copied()
                .unwrap_or(&[]),
        }
    }

    /// Check this data against `layout` and return its vertex count.
    pub fn validate(&self, layout: &VertexLayout) -> GeometryResult<usize> {
        let vertex_count = self.vertex_count();
        check_length(Attribute::Position, self.positions, vertex_count * POSITION_WIDTH)?;

        let found_channels = self.tex_coords.len() as u32;
        if found_channels != layout.tex_channel_count() {
            return Err(GeometryError::ChannelCountMismatch {
                expected: layout.tex_channel_count(),
                found: found_channels,
            });
        }

        if layout.has_normals() {
            let normals = self.normals.ok_or(GeometryError::MissingAttribute {
                attribute: Attribute::Normal,
            })?;
            check_length(Attribute::Normal, normals, vertex_count * NORMAL_WIDTH)?;
        } else if self.normals.is_some() {
            tracing::trace!("Ignoring normals for a layout without NORMAL");
        }

        for (channel, coords) in self.tex_coords.iter().enumerate() {
            check_length(
                Attribute::TexCoord(channel as u32),
                coords,
                vertex_count * TEXCOORD_WIDTH,
            )?;
        }

        Ok(vertex_count)
    }
}

fn check_length(attribute: Attribute, data: &[f32], expected: usize) -> GeometryResult<()> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(GeometryError::AttributeLength {
            attribute,
            expected,
            found: data.len(),
        })
    }
}
