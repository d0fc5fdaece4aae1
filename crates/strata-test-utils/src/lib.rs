//! Test utilities for Strata.
//!
//! - [`assert_invariants`] and [`assert_same_geometry`] for checking buffers
//! - [`OwnedVertices`] for generating deterministic vertex data
//! - `MockRenderer`, a recording [`GeometryRenderer`] (requires `mock`)
//!
//! [`GeometryRenderer`]: strata_geometry::GeometryRenderer
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use strata_geometry::{GeometryBuffer, UploadTracker, VertexLayout};
//! use strata_test_utils::{MockRenderer, OwnedVertices};
//!
//! let layout = VertexLayout::textured(1);
//! let mut buffer = GeometryBuffer::new(layout);
//! OwnedVertices::generate(&layout, 3, 0)
//!     .with_data(|data| buffer.push_back(data, &[0, 1, 2]))
//!     .unwrap();
//!
//! let mock = MockRenderer::new();
//! UploadTracker::new().sync(&buffer.view(), &mock);
//! assert_eq!(mock.count_index_uploads(), 1);
//! # }
//! ```

mod assertions;
mod fixtures;
#[cfg(feature = "mock")]
pub mod mock_render;

pub use assertions::*;
pub use fixtures::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
