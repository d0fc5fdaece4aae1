//! Seam between geometry buffers and whatever draws them.
//!
//! A renderer owns its GPU-side copies and decides when to refresh them.
//! [`UploadTracker`] remembers which buffer revision was last uploaded so a
//! renderer only re-uploads after the buffer actually changed.

use strata_core::profiling::profile_function;

use crate::buffer::BufferState;
use crate::layout::Attribute;
use crate::storage::SegmentStorage;
use crate::view::GeometryView;

/// Consumer of geometry uploads and draw calls.
///
/// Methods take `&self` so implementations can be shared behind `Arc` or
/// used as trait objects.
pub trait GeometryRenderer {
    /// Replace the GPU copy of one attribute segment.
    fn upload_segment(&self, attribute: Attribute, bytes: &[u8]);

    /// Replace the GPU copy of the index list.
    fn upload_indices(&self, bytes: &[u8], index_count: usize);

    /// Draw `index_count` indices as a triangle list.
    fn draw_indexed(&self, index_count: u32);
}

/// Tracks which revision of a buffer a renderer has uploaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadTracker {
    uploaded_revision: Option<u64>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revision of the last upload, if any.
    pub fn uploaded_revision(&self) -> Option<u64> {
        self.uploaded_revision
    }

    /// `true` if `view` holds geometry newer than the last upload.
    pub fn is_stale<S: SegmentStorage>(&self, view: &GeometryView<'_, S>) -> bool {
        view.state() == BufferState::Initialized
            && self.uploaded_revision != Some(view.revision())
    }

    /// Upload every enabled segment and the index list if `view` is stale.
    ///
    /// Returns `true` if anything was uploaded. A buffer with no data resets
    /// the tracker so the next geometry is always uploaded.
    pub fn sync<S: SegmentStorage>(
        &mut self,
        view: &GeometryView<'_, S>,
        renderer: &dyn GeometryRenderer,
    ) -> bool {
        profile_function!();

        if view.state() == BufferState::NoData {
            self.uploaded_revision = None;
            return false;
        }

        if !self.is_stale(view) {
            return false;
        }

        for (attribute, segment) in view.segments() {
            renderer.upload_segment(attribute, bytemuck::cast_slice(segment));
        }
        renderer.upload_indices(view.index_bytes(), view.index_count());

        tracing::debug!(
            buffer = ?view.label(),
            revision = view.revision(),
            vertices = view.vertex_count(),
            indices = view.index_count(),
            "Uploaded geometry"
        );

        self.uploaded_revision = Some(view.revision());
        true
    }
}

/// Issue a draw for `view` if it has any indices. Returns whether a draw
/// call was made.
///
/// Index lists longer than `u32::MAX` are not drawn at all rather than
/// drawn truncated.
pub fn draw<S: SegmentStorage>(view: &GeometryView<'_, S>, renderer: &dyn GeometryRenderer) -> bool {
    if view.state() == BufferState::NoData || view.index_count() == 0 {
        return false;
    }

    match draw_count(view.index_count()) {
        Some(count) => {
            renderer.draw_indexed(count);
            true
        }
        None => {
            tracing::warn!(
                buffer = ?view.label(),
                indices = view.index_count(),
                "Skipped draw: index count exceeds u32::MAX"
            );
            false
        }
    }
}

fn draw_count(index_count: usize) -> Option<u32> {
    u32::try_from(index_count).ok()
}
