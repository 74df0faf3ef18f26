//! The color mapper.  A pixel's color depends on where its score
//! ranks among all the scores in the frame, not on the score itself.
//! Low ranks shade from black into blue; the top fifteen percent
//! shade from black into red.

use histogram::{bucket, Histogram};
use MAX_ITERATIONS;

/// Hue (cumulative frequency) at which the palette switches from the
/// blue gradient to the red one.
pub const INTENSITY_CUTOFF: f64 = 0.85;

/// Stretches the hues above the cutoff back out to the full `0..1`.
pub const HIGH_INTENSITY_WEIGHT: f64 = 1.0 / (1.0 - INTENSITY_CUTOFF);

/// Brightest channel value.
pub const MAX_COLOR_VALUE: f64 = 255.0;

/// An RGBA color with channels in `0.0..=255.0`.  Only discretized
/// to bytes at the very end, after interpolation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba(pub f64, pub f64, pub f64, pub f64);

/// Points assumed to be in the set.
pub const BLACK: Rgba = Rgba(0.0, 0.0, 0.0, MAX_COLOR_VALUE);

impl Rgba {
    /// Linear blend: `self` at `proportion == 0`, `other` at `1`.
    pub fn interpolate(&self, other: &Rgba, proportion: f64) -> Rgba {
        let mix = |a: f64, b: f64| a * (1.0 - proportion) + b * proportion;
        Rgba(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
            mix(self.3, other.3),
        )
    }

    /// Round and clamp every channel to a byte.
    pub fn to_bytes(&self) -> [u8; 4] {
        let byte = |c: f64| c.round().max(0.0).min(MAX_COLOR_VALUE) as u8;
        [byte(self.0), byte(self.1), byte(self.2), byte(self.3)]
    }
}

/// Map a hue in `0..=1` onto the palette.
pub fn map_hue(hue: f64) -> Rgba {
    if hue < INTENSITY_CUTOFF {
        Rgba(0.0, 0.0, MAX_COLOR_VALUE * hue, MAX_COLOR_VALUE)
    } else {
        Rgba(
            MAX_COLOR_VALUE * (hue - INTENSITY_CUTOFF) * HIGH_INTENSITY_WEIGHT,
            0.0,
            0.0,
            MAX_COLOR_VALUE,
        )
    }
}

/// The color of one pixel given its score, the frame's histogram and
/// the histogram's total.
///
/// The two hues bracket the score: the cumulative frequency of every
/// bucket below the score's own, and that plus the score's bucket.
/// The fractional part of the score blends between them, which hides
/// the banding at whole-iteration boundaries.
pub fn color_for(score: f64, histogram: &Histogram, total_score: u64) -> Rgba {
    if score == MAX_ITERATIONS as f64 || total_score == 0 {
        return BLACK;
    }

    let total = total_score as f64;
    let n = bucket(score);
    let hue1 = histogram.count_below(n) as f64 / total;
    let hue2 = hue1 + histogram.count(n) as f64 / total;

    map_hue(hue1).interpolate(&map_hue(hue2), score.fract())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_black_whatever_the_histogram() {
        assert_eq!(color_for(MAX_ITERATIONS as f64, &Histogram::build(&[]), 0), BLACK);
        let busy = Histogram::build(&[0.5, 3.5, 3.5, 900.1]);
        assert_eq!(color_for(MAX_ITERATIONS as f64, &busy, busy.total()), BLACK);
        assert_eq!(BLACK.to_bytes(), [0, 0, 0, 255]);
    }

    #[test]
    fn low_hues_are_blue_high_hues_are_red() {
        assert_eq!(map_hue(0.0).to_bytes(), [0, 0, 0, 255]);
        assert_eq!(map_hue(0.5).to_bytes(), [0, 0, 128, 255]);
        assert_eq!(map_hue(INTENSITY_CUTOFF).to_bytes(), [0, 0, 0, 255]);
        assert_eq!(map_hue(1.0).to_bytes(), [255, 0, 0, 255]);
    }

    #[test]
    fn fraction_blends_between_bracketing_hues() {
        // hue1 = 1/4, hue2 = 3/4 for anything in bucket 1.
        let histogram = Histogram::build(&[0.5, 1.5, 1.25, 1000.0]);
        assert_eq!(color_for(1.5, &histogram, histogram.total()).to_bytes(), [0, 0, 128, 255]);
        assert_eq!(color_for(1.0, &histogram, histogram.total()).to_bytes(), [0, 0, 64, 255]);
        // hue1 = 0, hue2 = 1/4 for bucket 0.
        assert_eq!(color_for(0.5, &histogram, histogram.total()).to_bytes(), [0, 0, 32, 255]);
    }

    #[test]
    fn blends_cross_the_cutoff() {
        let mut scores = vec![0.5];
        scores.extend(vec![1.5; 19]);
        let histogram = Histogram::build(&scores);
        // Blue 12.75 at hue 0.05, a quarter of the way to full red.
        assert_eq!(color_for(1.25, &histogram, histogram.total()).to_bytes(), [64, 0, 10, 255]);
    }

    #[test]
    fn interpolate_endpoints() {
        let a = Rgba(10.0, 20.0, 30.0, 255.0);
        let b = Rgba(110.0, 120.0, 130.0, 255.0);
        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
        assert_eq!(a.interpolate(&b, 0.25).to_bytes(), [35, 45, 55, 255]);
    }
}
