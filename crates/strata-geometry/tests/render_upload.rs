//! Upload and draw behavior against a recording renderer.

use glam::Vec2;
use strata_geometry::*;
use strata_test_utils::{MockRenderer, OwnedVertices, RenderCall};

fn sprite_batch() -> GeometryBuffer {
    let mut buffer = GeometryBuffer::with_options(
        VertexLayout::textured(1),
        BufferOptions::new().with_label("sprites"),
    );
    add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE).unwrap();
    buffer
}

#[test]
fn test_first_sync_uploads_every_segment() {
    let buffer = sprite_batch();
    let mock = MockRenderer::new();
    let mut tracker = UploadTracker::new();

    assert!(tracker.sync(&buffer.view(), &mock));

    assert_eq!(mock.count_segment_uploads(), 2);
    assert_eq!(mock.count_index_uploads(), 1);
    assert_eq!(
        mock.last_segment(Attribute::Position).as_deref(),
        Some(buffer.positions())
    );
    assert_eq!(
        mock.last_segment(Attribute::TexCoord(0)).as_deref(),
        buffer.tex_coords(0)
    );
    assert_eq!(mock.last_indices().as_deref(), Some(buffer.indices()));
    assert_eq!(tracker.uploaded_revision(), Some(buffer.revision()));
}

#[test]
fn test_sync_skips_unchanged_buffer() {
    let buffer = sprite_batch();
    let mock = MockRenderer::new();
    let mut tracker = UploadTracker::new();

    tracker.sync(&buffer.view(), &mock);
    mock.clear_calls();

    assert!(!tracker.sync(&buffer.view(), &mock));
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_failed_mutation_does_not_trigger_upload() {
    let mut buffer = sprite_batch();
    let mock = MockRenderer::new();
    let mut tracker = UploadTracker::new();
    tracker.sync(&buffer.view(), &mock);

    assert!(buffer.erase_vertices(0, 1).is_err());
    assert!(!tracker.is_stale(&buffer.view()));
}

#[test]
fn test_erase_reuploads_shifted_indices() {
    let layout = VertexLayout::textured(1);
    let mut buffer = GeometryBuffer::new(layout);
    OwnedVertices::generate(&layout, 2, 0)
        .with_data(|data| buffer.push_back(data, &[]))
        .unwrap();
    add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE).unwrap();

    let mock = MockRenderer::new();
    let mut tracker = UploadTracker::new();
    tracker.sync(&buffer.view(), &mock);

    buffer.erase_vertices(0, 2).unwrap();
    assert!(tracker.sync(&buffer.view(), &mock));
    assert_eq!(mock.last_indices(), Some(RECTANGLE_INDICES.to_vec()));
    assert_eq!(mock.count_index_uploads(), 2);
}

#[test]
fn test_draw_records_index_count() {
    let buffer = sprite_batch();
    let mock = MockRenderer::new();

    assert!(draw(&buffer.view(), &mock));
    assert_eq!(mock.calls(), vec![RenderCall::DrawIndexed { index_count: 6 }]);
}

#[test]
fn test_cleared_buffer_is_neither_uploaded_nor_drawn() {
    let mut buffer = sprite_batch();
    let mock = MockRenderer::new();
    let mut tracker = UploadTracker::new();
    tracker.sync(&buffer.view(), &mock);

    buffer.clear();
    mock.clear_calls();

    assert!(!tracker.sync(&buffer.view(), &mock));
    assert!(!draw(&buffer.view(), &mock));
    assert_eq!(mock.call_count(), 0);

    add_2d_rectangle(&mut buffer, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, Vec2::ONE).unwrap();
    assert!(tracker.sync(&buffer.view(), &mock));
}
