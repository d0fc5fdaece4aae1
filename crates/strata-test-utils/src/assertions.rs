//! Assertion helpers for geometry buffers.

use strata_geometry::{GeometryBuffer, SegmentStorage};

/// Panic with a readable message if `buffer` breaks any of its invariants.
#[track_caller]
pub fn assert_invariants<S: SegmentStorage>(buffer: &GeometryBuffer<S>) {
    if let Err(err) = buffer.check_invariants() {
        panic!(
            "geometry buffer {:?} violates its invariants: {}",
            buffer.label(),
            err
        );
    }
}

/// Assert that two buffers hold the same logical geometry, whatever their
/// storage layouts.
#[track_caller]
pub fn assert_same_geometry<A: SegmentStorage, B: SegmentStorage>(
    left: &GeometryBuffer<A>,
    right: &GeometryBuffer<B>,
) {
    assert_eq!(left.layout(), right.layout(), "layouts differ");
    assert_eq!(left.vertex_count(), right.vertex_count(), "vertex counts differ");

    let left_view = left.view();
    let right_view = right.view();
    for ((attribute, a), (_, b)) in left_view.segments().zip(right_view.segments()) {
        assert_eq!(a, b, "{} segments differ", attribute);
    }

    assert_eq!(left.indices(), right.indices(), "indices differ");
    assert_eq!(left.state(), right.state(), "states differ");
}
