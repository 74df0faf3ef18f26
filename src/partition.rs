// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The work partitioner.  A raster of `width * height` pixels is
//! split into contiguous runs of raster-order offsets, one per
//! worker thread; each worker handles its run independently and the
//! results are stitched back together in offset order.

use crossbeam;
use itertools::iproduct;
use num_cpus;
use std::ops::Range;

use errors::RenderError;
use planes::{CanvasSize, PlaneMapper, RasterPoint};
use scorer::score;
use viewport::Viewport;

/// One escape score per pixel, in raster order: the score of pixel
/// `(x, y)` lives at `x + y * width`.
pub type ScoreField = Vec<f64>;

// Length of every run but possibly the last.
fn run_length(total: usize, fan_out: usize) -> usize {
    let fan_out = fan_out.max(1);
    ((total + fan_out - 1) / fan_out).max(1)
}

/// Split `0..total` into at most `fan_out` runs.  Run `i` covers
/// `i * ceil(total / fan_out)` up to the next run's start (or
/// `total`), so every offset is covered exactly once.  Empty runs are
/// not produced, which means fewer than `fan_out` runs come back when
/// there are fewer offsets than workers.
pub fn ranges(total: usize, fan_out: usize) -> Vec<Range<usize>> {
    let run = run_length(total, fan_out);
    (0..total)
        .step_by(run)
        .map(|start| start..(start + run).min(total))
        .collect()
}

/// Evaluate `f` on every offset in `0..total`, fanned out over
/// `fan_out` scoped threads.  The results come back in offset order
/// no matter which thread finishes first.
pub fn map_ranges<T, F>(
    total: usize,
    fan_out: usize,
    phase: &'static str,
    f: F,
) -> Result<Vec<T>, RenderError>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let runs = ranges(total, fan_out);
    debug!(total, runs = runs.len(), phase, "partitioned raster");
    let f = &f;

    let joined = crossbeam::scope(|spawner| {
        let handles: Vec<_> = runs
            .into_iter()
            .map(|run| {
                spawner.spawn(move |_| {
                    trace!(start = run.start, end = run.end, phase, "worker started");
                    run.map(f).collect::<Vec<T>>()
                })
            })
            .collect();

        // Joined in spawn order: this is the merge barrier.
        let mut merged = Vec::with_capacity(total);
        for handle in handles {
            match handle.join() {
                Ok(part) => merged.extend(part),
                Err(_) => return Err(RenderError::WorkerPanicked(phase)),
            }
        }
        Ok(merged)
    });

    match joined {
        Ok(merged) => merged,
        Err(_) => Err(RenderError::WorkerPanicked(phase)),
    }
}

/// Fill a flat RGBA buffer in place, four bytes per offset, with
/// `f(offset)`, fanned out the same way as `map_ranges`.
pub fn fill_pixels<F>(buffer: &mut [u8], fan_out: usize, f: F) -> Result<(), RenderError>
where
    F: Fn(usize) -> [u8; 4] + Sync,
{
    debug_assert!(buffer.len() % 4 == 0);
    let total = buffer.len() / 4;
    if total == 0 {
        return Ok(());
    }
    let run = run_length(total, fan_out);
    let f = &f;

    crossbeam::scope(|spawner| {
        for (i, pixels) in buffer.chunks_mut(run * 4).enumerate() {
            let start = i * run;
            spawner.spawn(move |_| {
                trace!(start, end = start + pixels.len() / 4, "color worker started");
                for (offset, pixel) in pixels.chunks_mut(4).enumerate() {
                    pixel.copy_from_slice(&f(start + offset));
                }
            });
        }
    })
    .map_err(|_| RenderError::WorkerPanicked("color"))
}

/// Score every pixel of `canvas` over `viewport`, using one worker
/// per CPU.
pub fn compute_score_field(
    viewport: &Viewport,
    canvas: CanvasSize,
) -> Result<ScoreField, RenderError> {
    compute_score_field_with(viewport, canvas, num_cpus::get())
}

/// Score every pixel of `canvas` over `viewport` with an explicit
/// worker count.  The output is identical for every `fan_out`.
pub fn compute_score_field_with(
    viewport: &Viewport,
    canvas: CanvasSize,
    fan_out: usize,
) -> Result<ScoreField, RenderError> {
    let plane = PlaneMapper::new(canvas, viewport)?;
    let total = canvas.pixel_count()?;
    map_ranges(total, fan_out, "score", |offset| {
        score(plane.offset_to_point(offset))
    })
}

/// The single-threaded reference: a plain raster scan.
pub fn score_field_single(
    viewport: &Viewport,
    canvas: CanvasSize,
) -> Result<ScoreField, RenderError> {
    let plane = PlaneMapper::new(canvas, viewport)?;
    let mut field = Vec::with_capacity(canvas.pixel_count()?);
    for (row, column) in iproduct!(0..canvas.height, 0..canvas.width) {
        field.push(score(plane.pixel_to_point(&RasterPoint(column, row))));
    }
    Ok(field)
}
