//! The frame assembler: one full render pass, from a viewport and a
//! raster size to a flat RGBA buffer.

use num_cpus;

use errors::RenderError;
use histogram::build_histogram;
use palette::color_for;
use partition::{compute_score_field_with, fill_pixels};
use planes::CanvasSize;
use viewport::Viewport;

/// A finished render: `width * height` RGBA quads, row-major, with
/// the origin at the top left.  Only ever handed out fully painted.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    canvas: CanvasSize,
    pixels: Vec<u8>,
}

impl Frame {
    /// Pixels per row.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Rows.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// The raster this frame was rendered at.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// The interleaved RGBA bytes, ready to blit.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Give up the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA quad at `(x, y)`, if that is on the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let offset = (x as usize + y as usize * self.canvas.width as usize) * 4;
        let mut quad = [0u8; 4];
        quad.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(quad)
    }
}

/// Render `viewport` onto a `width` by `height` raster, with one
/// worker per CPU.
pub fn render(viewport: &Viewport, width: u32, height: u32) -> Result<Frame, RenderError> {
    render_with_threads(viewport, CanvasSize::new(width, height), num_cpus::get())
}

/// Render with an explicit worker count.  Scoring and coloring are
/// each fanned out over `threads`; the histogram is built in between,
/// once every score is in.
pub fn render_with_threads(
    viewport: &Viewport,
    canvas: CanvasSize,
    threads: usize,
) -> Result<Frame, RenderError> {
    if canvas.is_empty() {
        return Err(RenderError::DegenerateViewport(format!(
            "canvas is {}x{} pixels",
            canvas.width, canvas.height
        )));
    }
    let len = canvas.pixel_count()?;
    debug!(
        width = canvas.width,
        height = canvas.height,
        threads,
        left = viewport.left(),
        right = viewport.right(),
        top = viewport.top(),
        bottom = viewport.bottom(),
        "rendering frame"
    );

    let scores = compute_score_field_with(viewport, canvas, threads)?;
    let (histogram, total) = build_histogram(&scores);

    let mut pixels = vec![0u8; len * 4];
    fill_pixels(&mut pixels, threads, |offset| {
        color_for(scores[offset], &histogram, total).to_bytes()
    })?;

    debug!(bytes = pixels.len(), "frame complete");
    Ok(Frame { canvas, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::BLACK;

    #[test]
    fn default_view_on_a_tiny_raster() {
        let viewport = Viewport::new(-2.0, 1.0, 1.3, -1.3).unwrap();
        let frame = render(&viewport, 4, 4).unwrap();
        assert_eq!(frame.as_bytes().len(), 64);
        // Pixel (2, 2) sits on (-0.5, 0), inside the main cardioid.
        assert_eq!(frame.pixel(2, 2), Some(BLACK.to_bytes()));
        assert!(frame.as_bytes().chunks(4).all(|quad| quad[3] == 255));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn zero_sized_canvas_is_degenerate() {
        for &(w, h) in &[(0, 4), (4, 0), (0, 0)] {
            match render(&Viewport::default(), w, h) {
                Err(RenderError::DegenerateViewport(_)) => (),
                other => panic!("expected DegenerateViewport, got {:?}", other),
            }
        }
    }

    #[test]
    fn thread_count_does_not_change_the_frame() {
        let viewport = Viewport::default();
        let canvas = CanvasSize::new(31, 17);
        let one = render_with_threads(&viewport, canvas, 1).unwrap();
        let many = render_with_threads(&viewport, canvas, 8).unwrap();
        assert_eq!(one, many);
    }
}
