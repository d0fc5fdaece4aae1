use std::ops::Range;

use super::{SegmentStorage, float_range};
use crate::layout::{Attribute, NORMAL_WIDTH, POSITION_WIDTH, TEXCOORD_WIDTH, VertexLayout};
use crate::vertex_data::VertexData;

/// Attributes packed by update cadence into two arrays.
///
/// ```text
/// dynamic: [ positions (3n) | normals (3n) ]
/// static:  [ channel 0 (2n) | channel 1 (2n) | ... ]
/// ```
///
/// Every segment base depends on the vertex count `n`, so mutations always
/// work from the count before the call and touch the later segment of an
/// array first. That keeps the bases of earlier segments valid while the
/// array changes length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSegments {
    dynamic: Vec<f32>,
    statics: Vec<f32>,
    has_normals: bool,
    tex_channels: usize,
}

impl GroupedSegments {
    /// Positions followed by normals.
    pub fn dynamic_data(&self) -> &[f32] {
        &self.dynamic
    }

    /// Every texture channel, back to back.
    pub fn static_data(&self) -> &[f32] {
        &self.statics
    }

    fn segment_range(&self, attribute: Attribute, vertex_count: usize) -> Option<Range<usize>> {
        match attribute {
            Attribute::Position => Some(0..vertex_count * POSITION_WIDTH),
            Attribute::Normal if self.has_normals => {
                let base = vertex_count * POSITION_WIDTH;
                Some(base..base + vertex_count * NORMAL_WIDTH)
            }
            Attribute::TexCoord(channel) if (channel as usize) < self.tex_channels => {
                let len = vertex_count * TEXCOORD_WIDTH;
                let base = len * channel as usize;
                Some(base..base + len)
            }
            _ => None,
        }
    }
}

impl SegmentStorage for GroupedSegments {
    fn with_layout(layout: &VertexLayout) -> Self {
        Self {
            dynamic: Vec::new(),
            statics: Vec::new(),
            has_normals: layout.has_normals(),
            tex_channels: layout.tex_channel_count() as usize,
        }
    }

    fn reserve(&mut self, layout: &VertexLayout, additional: usize) {
        let dynamic_width = POSITION_WIDTH + if self.has_normals { NORMAL_WIDTH } else { 0 };
        self.dynamic.reserve(additional * dynamic_width);
        self.statics
            .reserve(additional * TEXCOORD_WIDTH * layout.tex_channel_count() as usize);
    }

    fn segment(&self, attribute: Attribute, vertex_count: usize) -> &[f32] {
        let Some(range) = self.segment_range(attribute, vertex_count) else {
            return &[];
        };

        let array = match attribute {
            Attribute::TexCoord(_) => &self.statics,
            Attribute::Position | Attribute::Normal => &self.dynamic,
        };
        array.get(range).unwrap_or(&[])
    }

    fn insert(&mut self, _layout: &VertexLayout, vertex_count: usize, at: usize, data: &VertexData<'_>) {
        // Normals first: their base is 3n only while positions are unchanged.
        if self.has_normals {
            let base = vertex_count * POSITION_WIDTH;
            let offset = base + at * NORMAL_WIDTH;
            let normals = data.attribute(Attribute::Normal);
            self.dynamic.splice(offset..offset, normals.iter().copied());
        }

        let offset = at * POSITION_WIDTH;
        let positions = data.attribute(Attribute::Position);
        self.dynamic.splice(offset..offset, positions.iter().copied());

        // Highest channel first so channel i still starts at 2n * i.
        for channel in (0..self.tex_channels).rev() {
            let base = vertex_count * TEXCOORD_WIDTH * channel;
            let offset = base + at * TEXCOORD_WIDTH;
            let coords = data.attribute(Attribute::TexCoord(channel as u32));
            self.statics.splice(offset..offset, coords.iter().copied());
        }
    }

    fn erase(&mut self, _layout: &VertexLayout, vertex_count: usize, range: Range<usize>) {
        if self.has_normals {
            let base = vertex_count * POSITION_WIDTH;
            self.dynamic
                .drain(float_range(base, NORMAL_WIDTH, range.clone()));
        }

        self.dynamic
            .drain(float_range(0, POSITION_WIDTH, range.clone()));

        for channel in (0..self.tex_channels).rev() {
            let base = vertex_count * TEXCOORD_WIDTH * channel;
            self.statics
                .drain(float_range(base, TEXCOORD_WIDTH, range.clone()));
        }
    }

    fn clear(&mut self) {
        self.dynamic.clear();
        self.statics.clear();
    }

    fn backing_arrays(&self) -> Vec<&[f32]> {
        let mut arrays = vec![self.dynamic.as_slice()];
        if self.tex_channels > 0 {
            arrays.push(self.statics.as_slice());
        }
        arrays
    }
}
