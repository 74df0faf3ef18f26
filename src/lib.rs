#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot explorer engine
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c` never sends `z`
//! off to infinity.  Points outside the set escape at different
//! speeds, and that speed, smoothed into a fractional "score," is
//! what an explorer paints.
//!
//! Rather than painting the score directly, this engine ranks every
//! pixel's score against the distribution of all scores in the
//! current frame (a histogram), so that the gradient adapts to
//! whatever part of the plane is on screen.  Zooming in recenters
//! the view on a clicked pixel and halves its extent; zooming out
//! doubles it.
//!
//! A render runs in phases: score every pixel in parallel, join,
//! build the histogram, then color every pixel in parallel into a
//! flat RGBA buffer that can be handed to any display surface.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
extern crate num;
extern crate num_cpus;
#[macro_use]
extern crate tracing;

pub mod errors;
pub mod explorer;
pub mod frame;
pub mod histogram;
pub mod palette;
pub mod partition;
pub mod planes;
pub mod scorer;
pub mod viewport;

pub use errors::RenderError;
pub use explorer::{Explorer, RenderObserver, RenderState};
pub use frame::{render, render_with_threads, Frame};
pub use histogram::Histogram;
pub use palette::{color_for, Rgba, BLACK};
pub use partition::{compute_score_field, score_field_single};
pub use planes::{CanvasSize, PlaneMapper, RasterPoint};
pub use scorer::score;
pub use viewport::{zoom, Viewport};

/// The iteration cap for the divergence scorer.  A score of exactly
/// this value means the point never escaped and is assumed to be in
/// the set.
pub const MAX_ITERATIONS: usize = 1000;

/// Raster pixels per display pixel along each axis.  The set has
/// infinitely fine detail and aliasing is very visible, so the raster
/// is rendered larger than the surface it is shown on.  Whoever sizes
/// the canvas (or translates a pointer position) multiplies by this.
pub const PIXEL_RATIO: u32 = 2;
