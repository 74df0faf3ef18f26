//! An interactive exploring session: the active viewport, the raster
//! it is drawn onto, and where the last render got to.  Binding
//! pointer events and blitting frames belong to whatever display
//! surface drives this; it hears about each render through a
//! `RenderObserver`.
//!
//! Renders run synchronously on the caller's thread (fanning out
//! internally) and need `&mut self`, so one session never overlaps
//! itself.  A host that renders copies of the viewport on several
//! threads gets last-write-wins on its display.

use num_cpus;

use errors::RenderError;
use frame::{render_with_threads, Frame};
use planes::{CanvasSize, RasterPoint};
use viewport::{zoom, Viewport};
use PIXEL_RATIO;

/// Where the session is in its render cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// Nothing rendered yet, or the last render failed.
    Idle,
    /// A render pass is running.
    Rendering,
    /// The last render pass produced a frame.
    Rendered,
}

/// Hooks a display surface uses to show and hide its "working"
/// feedback, and to blit the finished frame.
pub trait RenderObserver {
    /// Called just before a render pass starts.
    fn rendering(&mut self) {}
    /// Called with the finished frame.
    fn rendered(&mut self, frame: &Frame);
}

/// One explorer session.
#[derive(Debug)]
pub struct Explorer {
    viewport: Viewport,
    canvas: CanvasSize,
    threads: usize,
    state: RenderState,
}

impl Explorer {
    /// A session over a raster of exactly `canvas`, starting at the
    /// default view.
    pub fn new(canvas: CanvasSize) -> Explorer {
        Explorer {
            viewport: Viewport::default(),
            canvas,
            threads: num_cpus::get(),
            state: RenderState::Idle,
        }
    }

    /// A session behind a display surface of the given size; the
    /// raster is oversampled by `PIXEL_RATIO`.
    pub fn for_display(width: u32, height: u32) -> Explorer {
        Explorer::new(CanvasSize::from_display(width, height))
    }

    /// Use `threads` workers per render phase instead of one per CPU.
    pub fn with_threads(mut self, threads: usize) -> Explorer {
        self.threads = threads.max(1);
        self
    }

    /// Start from `viewport` instead of the default view.
    pub fn with_viewport(mut self, viewport: Viewport) -> Explorer {
        self.viewport = viewport;
        self
    }

    /// The rectangle currently on screen.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The raster renders are drawn onto.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Where the render cycle is.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Change the raster, e.g. after the display surface resized.
    pub fn resize(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    /// Translate a pointer position on the display surface into the
    /// oversampled raster.
    pub fn display_to_raster(&self, x: u32, y: u32) -> RasterPoint {
        RasterPoint(x.saturating_mul(PIXEL_RATIO), y.saturating_mul(PIXEL_RATIO))
    }

    /// Recenter on the raster pixel `(raster_x, raster_y)`, zooming in
    /// or (conventionally on shift-click) out.  A pixel off the raster
    /// fails with `RasterOutOfBounds`.  On failure the active viewport
    /// is left as it was.
    pub fn zoom(
        &mut self,
        raster_x: u32,
        raster_y: u32,
        zoom_out: bool,
    ) -> Result<&Viewport, RenderError> {
        self.viewport = zoom(
            &RasterPoint(raster_x, raster_y),
            zoom_out,
            self.canvas,
            &self.viewport,
        )?;
        Ok(&self.viewport)
    }

    /// Render the active viewport, notifying `observer` before and
    /// after.  A failed render notifies nothing after, returns the
    /// session to `Idle` and hands the error back.
    pub fn render<O: RenderObserver>(&mut self, observer: &mut O) -> Result<Frame, RenderError> {
        self.state = RenderState::Rendering;
        observer.rendering();
        match render_with_threads(&self.viewport, self.canvas, self.threads) {
            Ok(frame) => {
                self.state = RenderState::Rendered;
                observer.rendered(&frame);
                Ok(frame)
            }
            Err(err) => {
                self.state = RenderState::Idle;
                Err(err)
            }
        }
    }
}
