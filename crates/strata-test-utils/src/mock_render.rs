//! Mock renderer for testing.
//!
//! Records every upload and draw without touching a GPU.

use parking_lot::Mutex;
use strata_geometry::{Attribute, GeometryRenderer};

/// A recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    UploadSegment {
        attribute: Attribute,
        /// Uploaded floats, decoded from the byte payload.
        data: Vec<f32>,
    },
    UploadIndices {
        data: Vec<u32>,
        index_count: usize,
    },
    DrawIndexed {
        index_count: u32,
    },
}

/// [`GeometryRenderer`] that records calls for verification in tests.
///
/// Calls are stored behind a `parking_lot::Mutex` so the trait's `&self`
/// methods can record them.
///
/// # Example
///
/// ```rust
/// use strata_geometry::{Attribute, GeometryRenderer};
/// use strata_test_utils::MockRenderer;
///
/// let mock = MockRenderer::new();
/// mock.upload_segment(Attribute::Position, bytemuck::cast_slice(&[1.0f32, 2.0, 3.0]));
///
/// assert_eq!(mock.count_segment_uploads(), 1);
/// assert_eq!(mock.last_segment(Attribute::Position), Some(vec![1.0, 2.0, 3.0]));
/// ```
#[derive(Debug, Default)]
pub struct MockRenderer {
    calls: Mutex<Vec<RenderCall>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn count_segment_uploads(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, RenderCall::UploadSegment { .. }))
            .count()
    }

    pub fn count_index_uploads(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, RenderCall::UploadIndices { .. }))
            .count()
    }

    pub fn count_draws(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, RenderCall::DrawIndexed { .. }))
            .count()
    }

    /// Most recent upload of `attribute`.
    pub fn last_segment(&self, attribute: Attribute) -> Option<Vec<f32>> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            RenderCall::UploadSegment { attribute: a, data } if *a == attribute => {
                Some(data.clone())
            }
            _ => None,
        })
    }

    /// Most recent index upload.
    pub fn last_indices(&self) -> Option<Vec<u32>> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            RenderCall::UploadIndices { data, .. } => Some(data.clone()),
            _ => None,
        })
    }
}

impl GeometryRenderer for MockRenderer {
    fn upload_segment(&self, attribute: Attribute, bytes: &[u8]) {
        self.calls.lock().push(RenderCall::UploadSegment {
            attribute,
            data: bytemuck::pod_collect_to_vec(bytes),
        });
    }

    fn upload_indices(&self, bytes: &[u8], index_count: usize) {
        self.calls.lock().push(RenderCall::UploadIndices {
            data: bytemuck::pod_collect_to_vec(bytes),
            index_count,
        });
    }

    fn draw_indexed(&self, index_count: u32) {
        self.calls
            .lock()
            .push(RenderCall::DrawIndexed { index_count });
    }
}
