//! The viewport: which rectangle of the complex plane is on screen,
//! and how a click turns one rectangle into the next.

use num::Complex;

use errors::RenderError;
use planes::{CanvasSize, PlaneMapper, RasterPoint};

/// How much one zoom-in shrinks each side of the viewport.  Zooming
/// out grows it by the reciprocal.
pub const ZOOM_INCREMENT: f64 = 0.5;

/// A rectangle on the complex plane, in cartesian orientation: `top`
/// is the larger imaginary bound.  Only constructible with finite
/// bounds and positive area, and never edited piecemeal; a zoom
/// produces a whole new one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Default for Viewport {
    /// The initial view: the whole set with a little margin.
    fn default() -> Self {
        Viewport {
            left: -2.0,
            right: 1.0,
            top: 1.3,
            bottom: -1.3,
        }
    }
}

impl Viewport {
    /// Checks that all four bounds are finite and that the rectangle
    /// has positive width and height.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Result<Viewport, RenderError> {
        if !(left.is_finite() && right.is_finite() && top.is_finite() && bottom.is_finite()) {
            return Err(RenderError::NonFiniteInput(format!(
                "viewport bounds left={} right={} top={} bottom={}",
                left, right, top, bottom
            )));
        }
        if !(right > left) {
            return Err(RenderError::DegenerateViewport(format!(
                "right bound {} is not to the right of left bound {}",
                right, left
            )));
        }
        if !(top > bottom) {
            return Err(RenderError::DegenerateViewport(format!(
                "top bound {} is not above bottom bound {}",
                top, bottom
            )));
        }
        if !((right - left).is_finite() && (top - bottom).is_finite()) {
            return Err(RenderError::NonFiniteInput(
                "viewport extent overflows f64".to_string(),
            ));
        }
        Ok(Viewport {
            left,
            right,
            top,
            bottom,
        })
    }

    /// Build a viewport from its left-lower and right-upper corners.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Viewport, RenderError> {
        Viewport::new(leftlower.re, rightupper.re, rightupper.im, leftlower.im)
    }

    /// Build a viewport of the given extent around `center`.
    pub fn centered(center: Complex<f64>, width: f64, height: f64) -> Result<Viewport, RenderError> {
        Viewport::new(
            center.re - width / 2.0,
            center.re + width / 2.0,
            center.im + height / 2.0,
            center.im - height / 2.0,
        )
    }

    /// Smallest real bound.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Largest real bound.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Largest imaginary bound.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Smallest imaginary bound.
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// The point in the middle of the rectangle.
    pub fn center(&self) -> Complex<f64> {
        Complex::new(
            self.left + self.width() / 2.0,
            self.bottom + self.height() / 2.0,
        )
    }
}

/// Scale the viewport by `ZOOM_INCREMENT` (or its reciprocal when
/// `zoom_out` is set) and center it on the point under `pixel`, which
/// must lie on `canvas`.  The
/// new bounds are computed from the clicked point alone, never from
/// the old bounds plus a delta.
pub fn zoom(
    pixel: &RasterPoint,
    zoom_out: bool,
    canvas: CanvasSize,
    viewport: &Viewport,
) -> Result<Viewport, RenderError> {
    let center = PlaneMapper::new(canvas, viewport)?.locate(pixel)?;
    let factor = if zoom_out {
        1.0 / ZOOM_INCREMENT
    } else {
        ZOOM_INCREMENT
    };
    let zoomed = Viewport::centered(
        center,
        viewport.width() * factor,
        viewport.height() * factor,
    )?;
    info!(
        re = center.re,
        im = center.im,
        zoom_out,
        width = zoomed.width(),
        "zoomed viewport"
    );
    Ok(zoomed)
}
