//! Split and grouped storage must agree on every observable result.
//!
//! Both layouts are driven through the same operation sequence and compared
//! after each step.

use strata_geometry::*;
use strata_test_utils::{OwnedVertices, assert_invariants, assert_same_geometry};

// ============================================================================
// Helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    PushBack { vertices: usize, indices: Vec<u32> },
    InsertVertices { at: usize, vertices: usize },
    InsertIndices { at: usize, values: Vec<u32> },
    Erase { first: usize, last: usize },
    Clear,
}

fn apply<S: SegmentStorage>(buffer: &mut GeometryBuffer<S>, op: &Op, seed: u32) -> GeometryResult<()> {
    let layout = *buffer.layout();
    match op {
        Op::PushBack { vertices, indices } => OwnedVertices::generate(&layout, *vertices, seed)
            .with_data(|data| buffer.push_back(data, indices)),
        Op::InsertVertices { at, vertices } => OwnedVertices::generate(&layout, *vertices, seed)
            .with_data(|data| buffer.insert_vertices(*at, data)),
        Op::InsertIndices { at, values } => buffer.insert_indices(*at, values),
        Op::Erase { first, last } => buffer.erase_vertices(*first, *last),
        Op::Clear => {
            buffer.clear();
            Ok(())
        }
    }
}

fn script() -> Vec<Op> {
    vec![
        Op::PushBack {
            vertices: 4,
            indices: vec![0, 1, 2, 0, 2, 3],
        },
        Op::InsertVertices { at: 0, vertices: 2 },
        Op::PushBack {
            vertices: 3,
            indices: vec![2, 1, 0],
        },
        Op::InsertVertices { at: 5, vertices: 1 },
        Op::InsertIndices {
            at: 3,
            values: vec![5, 9, 9],
        },
        // Vertex 4 is unreferenced.
        Op::Erase { first: 4, last: 5 },
        // Rejected: vertex 8 is still referenced.
        Op::Erase { first: 8, last: 9 },
        Op::InsertVertices { at: 9, vertices: 2 },
        Op::Erase { first: 9, last: 11 },
        Op::InsertIndices {
            at: 100,
            values: vec![0],
        },
        Op::PushBack {
            vertices: 2,
            indices: vec![0, 1, 1],
        },
        Op::Clear,
        Op::PushBack {
            vertices: 3,
            indices: vec![0, 1, 2],
        },
    ]
}

fn run_script(layout: VertexLayout) {
    let mut grouped = GeometryBuffer::new(layout);
    let mut split = GeometryBuffer::<SplitSegments>::with_storage(layout, BufferOptions::new());

    for (step, op) in script().iter().enumerate() {
        let seed = step as u32;
        let a = apply(&mut grouped, op, seed);
        let b = apply(&mut split, op, seed);

        assert_eq!(a, b, "step {step} ({op:?}) returned different results");
        assert_invariants(&grouped);
        assert_invariants(&split);
        assert_same_geometry(&grouped, &split);
        assert_eq!(grouped.revision(), split.revision(), "step {step}");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_position_only_layouts_agree() {
    run_script(VertexLayout::position_only());
}

#[test]
fn test_normal_layouts_agree() {
    run_script(VertexLayout::position_normal());
}

#[test]
fn test_textured_layouts_agree() {
    run_script(VertexLayout::textured(1));
    run_script(VertexLayout::textured(3));
}

#[test]
fn test_lit_textured_layouts_agree() {
    run_script(VertexLayout::lit_textured(2));
}

#[test]
fn test_script_outcomes() {
    let mut buffer = GeometryBuffer::new(VertexLayout::lit_textured(1));
    let outcomes: Vec<bool> = script()
        .iter()
        .enumerate()
        .map(|(step, op)| apply(&mut buffer, op, step as u32).is_ok())
        .collect();

    assert_eq!(
        outcomes,
        vec![
            true, true, true, true, true, true, false, true, true, false, true, true, true
        ]
    );
    assert_eq!(buffer.indices(), &[0, 1, 2]);
}

#[test]
fn test_grouped_storage_packs_dynamic_and_static_data() {
    let layout = VertexLayout::lit_textured(2);
    let mut buffer = GeometryBuffer::new(layout);
    let vertices = OwnedVertices::generate(&layout, 2, 0);
    vertices
        .with_data(|data| buffer.push_back(data, &[0, 1, 1]))
        .unwrap();

    let storage = buffer.storage();
    let mut dynamic = vertices.positions.clone();
    dynamic.extend_from_slice(vertices.normals.as_deref().unwrap());
    assert_eq!(storage.dynamic_data(), dynamic.as_slice());

    let statics: Vec<f32> = vertices.tex_coords.concat();
    assert_eq!(storage.static_data(), statics.as_slice());
    assert_eq!(buffer.view().backing_arrays().len(), 2);
}
