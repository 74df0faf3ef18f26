//! Contains the PlaneMapper struct, which describes a relationship
//! between a raster with an origin at its top-left corner, where y
//! grows downward, and a rectangle on the complex plane, where the
//! imaginary axis grows upward.  The one sign flip between the two
//! happens here and nowhere else.
use num::Complex;

use errors::RenderError;
use viewport::Viewport;
use PIXEL_RATIO;

/// Describes the width and height of the output raster, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    /// Pixels per row.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl CanvasSize {
    /// A raster of exactly `width` by `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        CanvasSize { width, height }
    }

    /// The raster behind a display surface of the given size, scaled
    /// up by `PIXEL_RATIO` in each direction.
    pub fn from_display(width: u32, height: u32) -> Self {
        CanvasSize {
            width: width.saturating_mul(PIXEL_RATIO),
            height: height.saturating_mul(PIXEL_RATIO),
        }
    }

    /// The number of pixels in the raster, if that fits in a `usize`
    /// four times over (once per RGBA channel).
    pub fn pixel_count(&self) -> Result<usize, RenderError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4).map(|_| n))
            .ok_or(RenderError::CanvasTooLarge(self.width, self.height))
    }

    /// Describes that the raster has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Describes the x, y of a pixel on the raster.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterPoint(pub u32, pub u32);

/// Maps pixels of a raster onto a viewport and back.  Built once per
/// render (or per click) so that the interactive zoom and the bulk
/// scoring share the same per-pixel steps.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    canvas: CanvasSize,
    // Complex coordinate of raster pixel (0, 0): left and top bounds.
    origin: Complex<f64>,
    // Logical units per pixel, horizontally and vertically.
    step: (f64, f64),
}

impl PlaneMapper {
    /// Fails with `DegenerateViewport` when the raster has no pixels,
    /// rather than dividing by zero.
    pub fn new(canvas: CanvasSize, viewport: &Viewport) -> Result<PlaneMapper, RenderError> {
        if canvas.is_empty() {
            return Err(RenderError::DegenerateViewport(format!(
                "canvas is {}x{} pixels",
                canvas.width, canvas.height
            )));
        }

        let step = (
            viewport.width() / f64::from(canvas.width),
            viewport.height() / f64::from(canvas.height),
        );

        let magnitude = viewport
            .left()
            .abs()
            .max(viewport.right().abs())
            .max(viewport.top().abs())
            .max(viewport.bottom().abs());
        if step.0.min(step.1) <= magnitude * f64::EPSILON * 4.0 {
            warn!(
                step_re = step.0,
                step_im = step.1,
                "pixel step is at the f64 precision floor; expect blocky output"
            );
        }

        Ok(PlaneMapper {
            canvas,
            origin: Complex::new(viewport.left(), viewport.top()),
            step,
        })
    }

    /// The raster being mapped.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// The complex coordinate of raster pixel (0, 0).
    pub fn origin(&self) -> Complex<f64> {
        self.origin
    }

    /// The total number of pixels in the raster.
    pub fn len(&self) -> usize {
        self.canvas.width as usize * self.canvas.height as usize
    }

    /// Describes that the raster is of no size.
    pub fn is_empty(&self) -> bool {
        self.canvas.is_empty()
    }

    /// Describes that `pixel` lies on the raster.
    pub fn contains(&self, pixel: &RasterPoint) -> bool {
        pixel.0 < self.canvas.width && pixel.1 < self.canvas.height
    }

    /// `pixel_to_point` for addresses that come from outside, such as
    /// a click: fails with `RasterOutOfBounds` when `pixel` is not on
    /// the raster.
    pub fn locate(&self, pixel: &RasterPoint) -> Result<Complex<f64>, RenderError> {
        if !self.contains(pixel) {
            return Err(RenderError::RasterOutOfBounds(
                pixel.0,
                pixel.1,
                self.canvas.width,
                self.canvas.height,
            ));
        }
        Ok(self.pixel_to_point(pixel))
    }

    /// Given a pixel on the raster, return the point on the complex
    /// plane under its top-left corner.  The pixel is not bounds
    /// checked; see `locate`.
    pub fn pixel_to_point(&self, pixel: &RasterPoint) -> Complex<f64> {
        Complex::new(
            f64::from(pixel.0) * self.step.0 + self.origin.re,
            self.origin.im - f64::from(pixel.1) * self.step.1,
        )
    }

    /// Same as `pixel_to_point`, addressed by raster-order offset.
    pub fn offset_to_point(&self, offset: usize) -> Complex<f64> {
        let width = self.canvas.width as usize;
        self.pixel_to_point(&RasterPoint(
            (offset % width) as u32,
            (offset / width) as u32,
        ))
    }

    /// Given a point on the complex plane, return the pixel whose
    /// area contains it, or `None` if it falls outside the raster.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<RasterPoint> {
        let left = (point.re - self.origin.re) / self.step.0;
        let top = (self.origin.im - point.im) / self.step.1;
        if !(left >= 0.0
            && left < f64::from(self.canvas.width)
            && top >= 0.0
            && top < f64::from(self.canvas.height))
        {
            return None;
        }
        Some(RasterPoint(left as u32, top as u32))
    }
}

/// Map one pixel of a `canvas`-sized raster onto `viewport`.  The
/// pixel must lie on the raster.
pub fn pixel_to_point(
    pixel: &RasterPoint,
    canvas: CanvasSize,
    viewport: &Viewport,
) -> Result<Complex<f64>, RenderError> {
    PlaneMapper::new(canvas, viewport)?.locate(pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Viewport {
        Viewport::new(-2.0, 2.0, 2.0, -2.0).unwrap()
    }

    #[test]
    fn planemapper_fails_on_empty_canvas() {
        for canvas in &[CanvasSize::new(0, 4), CanvasSize::new(4, 0)] {
            match PlaneMapper::new(*canvas, &square()) {
                Err(RenderError::DegenerateViewport(_)) => (),
                other => panic!("expected DegenerateViewport, got {:?}", other),
            }
        }
        assert!(pixel_to_point(&RasterPoint(0, 0), CanvasSize::new(0, 4), &square()).is_err());
    }

    #[test]
    fn raster_top_is_logical_top() {
        let pm = PlaneMapper::new(CanvasSize::new(4, 4), &square()).unwrap();
        assert_eq!(pm.pixel_to_point(&RasterPoint(0, 0)), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&RasterPoint(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&RasterPoint(3, 3)), Complex::new(1.0, -1.0));
        assert_eq!(pm.pixel_to_point(&RasterPoint(0, 3)), Complex::new(-2.0, -1.0));
    }

    #[test]
    fn offsets_walk_rows_first() {
        let pm = PlaneMapper::new(CanvasSize::new(4, 2), &square()).unwrap();
        assert_eq!(pm.len(), 8);
        assert_eq!(pm.offset_to_point(1), pm.pixel_to_point(&RasterPoint(1, 0)));
        assert_eq!(pm.offset_to_point(5), pm.pixel_to_point(&RasterPoint(1, 1)));
    }

    #[test]
    fn point_to_pixel_inverts_pixel_to_point() {
        let pm = PlaneMapper::new(CanvasSize::new(640, 480), &square()).unwrap();
        for pixel in &[RasterPoint(0, 0), RasterPoint(320, 240), RasterPoint(639, 479)] {
            let point = pm.pixel_to_point(pixel);
            // Nudge into the pixel's interior so flooring is exact.
            let inside = point + Complex::new(1.0e-9, -1.0e-9);
            assert_eq!(pm.point_to_pixel(&inside), Some(*pixel));
        }
    }

    #[test]
    fn point_to_pixel_rejects_outside_points() {
        let pm = PlaneMapper::new(CanvasSize::new(4, 4), &square()).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.5, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 2.5)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, -2.0)), None);
    }

    #[test]
    fn pixels_off_the_raster_are_refused() {
        let canvas = CanvasSize::new(4, 3);
        let pm = PlaneMapper::new(canvas, &square()).unwrap();
        assert!(pm.contains(&RasterPoint(3, 2)));
        assert_eq!(pm.locate(&RasterPoint(3, 2)), Ok(pm.pixel_to_point(&RasterPoint(3, 2))));
        for &(x, y) in &[(4, 0), (0, 3), (1000, 1000)] {
            assert!(!pm.contains(&RasterPoint(x, y)));
            assert_eq!(
                pixel_to_point(&RasterPoint(x, y), canvas, &square()),
                Err(RenderError::RasterOutOfBounds(x, y, 4, 3))
            );
        }
    }

    #[test]
    fn accessors_report_construction() {
        let pm = PlaneMapper::new(CanvasSize::new(4, 4), &square()).unwrap();
        assert_eq!(pm.canvas(), CanvasSize::new(4, 4));
        assert_eq!(pm.origin(), Complex::new(-2.0, 2.0));
    }

    #[test]
    fn display_sizes_are_oversampled() {
        assert_eq!(CanvasSize::from_display(400, 300), CanvasSize::new(800, 600));
    }

    #[test]
    fn huge_canvases_are_refused() {
        let canvas = CanvasSize::new(u32::max_value(), u32::max_value());
        if cfg!(target_pointer_width = "64") {
            assert_eq!(
                canvas.pixel_count(),
                Err(RenderError::CanvasTooLarge(u32::max_value(), u32::max_value()))
            );
        }
        assert_eq!(CanvasSize::new(4, 4).pixel_count(), Ok(16));
    }
}
