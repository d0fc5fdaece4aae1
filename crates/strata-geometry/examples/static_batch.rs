//! Static Batch Example
//!
//! Builds a tile map as one geometry batch, edits it, and pushes each
//! revision through a renderer that only logs what it receives.
//!
//! Features demonstrated:
//! - Appending quads with `add_2d_rectangle` (indices re-based per quad)
//! - Merging batches with `append`
//! - Upload tracking so unchanged geometry is not re-sent
//!
//! Run with: cargo run -p strata-geometry --example static_batch
//! Set `RUST_LOG=trace` to see every buffer mutation.

use glam::Vec2;
use strata_core::config::{Config, ProfilingMode};
use strata_core::logging;
use strata_core::profiling::{finish_frame, init_profiling, profile_scope};
use strata_geometry::{
    Attribute, BufferOptions, GeometryBuffer, GeometryRenderer, GeometryResult, UploadTracker,
    VertexLayout, add_2d_rectangle, draw,
};

const GRID: u32 = 8;
const TILE: f32 = 32.0;

/// Renderer that reports uploads and draws through `tracing`.
struct LogRenderer;

impl GeometryRenderer for LogRenderer {
    fn upload_segment(&self, attribute: Attribute, bytes: &[u8]) {
        tracing::info!("upload {}: {} bytes", attribute, bytes.len());
    }

    fn upload_indices(&self, bytes: &[u8], index_count: usize) {
        tracing::info!("upload indices: {} ({} bytes)", index_count, bytes.len());
    }

    fn draw_indexed(&self, index_count: u32) {
        tracing::info!("draw {} indices", index_count);
    }
}

fn build_tiles(buffer: &mut GeometryBuffer) -> GeometryResult<()> {
    profile_scope!("build_tiles");

    for y in 0..GRID {
        for x in 0..GRID {
            let min = Vec2::new(x as f32, y as f32) * TILE;
            // Alternate between the two halves of a 2x1 atlas.
            let u = ((x + y) % 2) as f32 * 0.5;
            add_2d_rectangle(
                buffer,
                min,
                min + Vec2::splat(TILE),
                Vec2::new(u, 0.0),
                Vec2::new(u + 0.5, 1.0),
            )?;
        }
    }
    Ok(())
}

fn main() -> GeometryResult<()> {
    let config = Config::default().with_profiling(ProfilingMode::On);
    logging::try_init(&config);
    init_profiling(&config.profiling);

    let tiles = (GRID * GRID) as usize;
    let mut batch = GeometryBuffer::with_options(
        VertexLayout::textured(1),
        BufferOptions::new()
            .with_label("tiles")
            .with_vertex_capacity(tiles * 4)
            .with_index_capacity(tiles * 6),
    );

    let renderer = LogRenderer;
    let mut tracker = UploadTracker::new();

    build_tiles(&mut batch)?;
    tracker.sync(&batch.view(), &renderer);
    draw(&batch.view(), &renderer);
    finish_frame();

    // Nothing changed, so nothing is uploaded.
    let uploaded = tracker.sync(&batch.view(), &renderer);
    tracing::info!("second sync uploaded: {}", uploaded);
    finish_frame();

    // Tile 0 is still drawn, so its vertices cannot be erased.
    if let Err(err) = batch.erase_vertices(0, 4) {
        tracing::info!("erase refused: {}", err);
    }

    // Merge a second batch; its indices land after the existing tiles.
    let mut overlay = GeometryBuffer::new(*batch.layout());
    add_2d_rectangle(
        &mut overlay,
        Vec2::ZERO,
        Vec2::splat(GRID as f32 * TILE),
        Vec2::ZERO,
        Vec2::ONE,
    )?;
    batch.append(&overlay)?;

    tracker.sync(&batch.view(), &renderer);
    draw(&batch.view(), &renderer);
    finish_frame();

    tracing::info!(
        "batch: {} vertices, {} triangles, revision {}",
        batch.vertex_count(),
        batch.triangle_count(),
        batch.revision()
    );

    Ok(())
}
