//! Deterministic vertex data for tests and benchmarks.

use strata_geometry::{NORMAL_WIDTH, POSITION_WIDTH, TEXCOORD_WIDTH, VertexData, VertexLayout};

/// Owned vertex attributes matching a layout.
///
/// Values encode their vertex and component (`seed * 1000 + vertex * 10 +
/// component`, offset per attribute) so misplaced floats are easy to spot in
/// assertion output.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedVertices {
    pub positions: Vec<f32>,
    pub normals: Option<Vec<f32>>,
    pub tex_coords: Vec<Vec<f32>>,
}

impl OwnedVertices {
    /// Generate `count` vertices for `layout`. Different seeds give
    /// different values.
    pub fn generate(layout: &VertexLayout, count: usize, seed: u32) -> Self {
        let base = seed as f32 * 1000.0;
        let fill = |width: usize, offset: f32| -> Vec<f32> {
            (0..count * width)
                .map(|i| base + offset + (i / width) as f32 * 10.0 + (i % width) as f32)
                .collect()
        };

        Self {
            positions: fill(POSITION_WIDTH, 0.0),
            normals: layout.has_normals().then(|| fill(NORMAL_WIDTH, 0.5)),
            tex_coords: (0..layout.tex_channel_count())
                .map(|channel| fill(TEXCOORD_WIDTH, 0.25 + channel as f32 * 100.0))
                .collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_WIDTH
    }

    /// Borrow as [`VertexData`] for the duration of `f`.
    pub fn with_data<R>(&self, f: impl FnOnce(&VertexData<'_>) -> R) -> R {
        let channels: Vec<&[f32]> = self.tex_coords.iter().map(Vec::as_slice).collect();
        let mut data = VertexData::new(&self.positions).with_tex_coords(&channels);
        if let Some(normals) = &self.normals {
            data = data.with_normals(normals);
        }
        f(&data)
    }
}
