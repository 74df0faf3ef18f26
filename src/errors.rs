//! The ways a render can fail.  All of them are deterministic: the
//! same inputs fail the same way every time, so nothing here is
//! retried.

/// Errors surfaced by the engine.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum RenderError {
    /// The logical or raster rectangle has zero (or negative) area.
    #[fail(display = "degenerate viewport: {}", _0)]
    DegenerateViewport(String),

    /// A NaN or infinite bound reached the engine.
    #[fail(display = "non-finite input: {}", _0)]
    NonFiniteInput(String),

    /// The raster is too large to address as one flat RGBA buffer.
    #[fail(display = "canvas of {}x{} pixels is too large", _0, _1)]
    CanvasTooLarge(u32, u32),

    /// A pixel address that does not lie on the raster.
    #[fail(
        display = "raster point ({}, {}) is outside the {}x{} canvas",
        _0, _1, _2, _3
    )]
    RasterOutOfBounds(u32, u32, u32, u32),

    /// One of the scoped worker threads panicked.
    #[fail(display = "a render worker panicked during the {} phase", _0)]
    WorkerPanicked(&'static str),
}
