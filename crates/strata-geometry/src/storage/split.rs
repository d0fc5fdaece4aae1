use std::ops::Range;

use super::{SegmentStorage, float_range};
use crate::layout::{Attribute, NORMAL_WIDTH, POSITION_WIDTH, TEXCOORD_WIDTH, VertexLayout};
use crate::vertex_data::VertexData;

/// One independent array per attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitSegments {
    positions: Vec<f32>,
    normals: Option<Vec<f32>>,
    tex_coords: Vec<Vec<f32>>,
}

impl SplitSegments {
    fn segment_mut(&mut self, attribute: Attribute) -> Option<&mut Vec<f32>> {
        match attribute {
            Attribute::Position => Some(&mut self.positions),
            Attribute::Normal => self.normals.as_mut(),
            Attribute::TexCoord(channel) => self.tex_coords.get_mut(channel as usize),
        }
    }
}

impl SegmentStorage for SplitSegments {
    fn with_layout(layout: &VertexLayout) -> Self {
        Self {
            positions: Vec::new(),
            normals: layout.has_normals().then(Vec::new),
            tex_coords: vec![Vec::new(); layout.tex_channel_count() as usize],
        }
    }

    fn reserve(&mut self, _layout: &VertexLayout, additional: usize) {
        self.positions.reserve(additional * POSITION_WIDTH);
        if let Some(normals) = &mut self.normals {
            normals.reserve(additional * NORMAL_WIDTH);
        }
        for channel in &mut self.tex_coords {
            channel.reserve(additional * TEXCOORD_WIDTH);
        }
    }

    fn segment(&self, attribute: Attribute, _vertex_count: usize) -> &[f32] {
        match attribute {
            Attribute::Position => &self.positions,
            Attribute::Normal => self.normals.as_deref().unwrap_or(&[]),
            Attribute::TexCoord(channel) => self
                .tex_coords
                .get(channel as usize)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    fn insert(&mut self, layout: &VertexLayout, _vertex_count: usize, at: usize, data: &VertexData<'_>) {
        for attribute in layout.attributes() {
            let source = data.attribute(attribute);
            if let Some(segment) = self.segment_mut(attribute) {
                let offset = at * attribute.width();
                segment.splice(offset..offset, source.iter().copied());
            }
        }
    }

    fn extend(&mut self, layout: &VertexLayout, _vertex_count: usize, data: &VertexData<'_>) {
        for attribute in layout.attributes() {
            let source = data.attribute(attribute);
            if let Some(segment) = self.segment_mut(attribute) {
                segment.extend_from_slice(source);
            }
        }
    }

    fn erase(&mut self, layout: &VertexLayout, _vertex_count: usize, range: Range<usize>) {
        for attribute in layout.attributes() {
            if let Some(segment) = self.segment_mut(attribute) {
                segment.drain(float_range(0, attribute.width(), range.clone()));
            }
        }
    }

    fn clear(&mut self) {
        self.positions.clear();
        if let Some(normals) = &mut self.normals {
            normals.clear();
        }
        for channel in &mut self.tex_coords {
            channel.clear();
        }
    }

    fn backing_arrays(&self) -> Vec<&[f32]> {
        let mut arrays = vec![self.positions.as_slice()];
        arrays.extend(self.normals.as_deref());
        arrays.extend(self.tex_coords.iter().map(Vec::as_slice));
        arrays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_in_the_middle() {
        let layout = VertexLayout::lit_textured(1);
        let mut storage = SplitSegments::with_layout(&layout);

        let positions = [0.0, 0.0, 0.0, 2.0, 2.0, 2.0];
        let normals = [0.0, 0.0, 1.0, 0.0, 0.0, 2.0];
        let uvs = [0.0, 0.0, 2.0, 2.0];
        let channels = [&uvs[..]];
        let data = VertexData::new(&positions)
            .with_normals(&normals)
            .with_tex_coords(&channels);
        storage.extend(&layout, 0, &data);

        let positions = [1.0, 1.0, 1.0];
        let normals = [0.0, 0.0, 1.5];
        let uvs = [1.0, 1.0];
        let channels = [&uvs[..]];
        let data = VertexData::new(&positions)
            .with_normals(&normals)
            .with_tex_coords(&channels);
        storage.insert(&layout, 2, 1, &data);

        assert_eq!(
            storage.segment(Attribute::Position, 3),
            &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]
        );
        assert_eq!(
            storage.segment(Attribute::Normal, 3),
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.5, 0.0, 0.0, 2.0]
        );
        assert_eq!(
            storage.segment(Attribute::TexCoord(0), 3),
            &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]
        );
        assert_eq!(storage.backing_arrays().len(), 3);
    }

    #[test]
    fn test_disabled_segments_are_empty() {
        let layout = VertexLayout::position_only();
        let storage = SplitSegments::with_layout(&layout);
        assert!(storage.segment(Attribute::Normal, 0).is_empty());
        assert!(storage.segment(Attribute::TexCoord(0), 0).is_empty());
        assert_eq!(storage.backing_arrays().len(), 1);
    }
}
