// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The divergence scorer.  Takes one point on the complex plane and
//! says how quickly the Mandelbrot recurrence escapes from it.  This
//! is the unit of parallel work: it reads nothing but its argument
//! and the constants below, so it may be called from any thread in
//! any order.

use num::Complex;

use MAX_ITERATIONS;

/// The orbit is considered escaped once `|z|^2` reaches this.  Any
/// value of at least 4 is correct; a much larger radius makes the
/// smoothing correction below far less banded.
pub const ESCAPE_RADIUS_SQUARED: f64 = 3840.0;

/// Iterate `z = z^2 + c` from `z = 0` and return the escape score of
/// `c`.  Points that never escape within `MAX_ITERATIONS` get exactly
/// `MAX_ITERATIONS`; everything else gets a fractional, smoothed
/// iteration count in `[0, MAX_ITERATIONS)`.
pub fn score(point: Complex<f64>) -> f64 {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut iteration = 0;
    while z.norm_sqr() < ESCAPE_RADIUS_SQUARED && iteration < MAX_ITERATIONS {
        z = z * z + point;
        iteration += 1;
    }

    if iteration >= MAX_ITERATIONS {
        return MAX_ITERATIONS as f64;
    }

    // Normalized iteration count: subtract how far past the escape
    // radius the orbit overshot, measured in doublings of log |z|.
    let zn = z.norm_sqr().sqrt();
    let nu = (zn.ln() / 2.0_f64.ln()).ln() / 2.0_f64.ln();

    // Points far outside the set overshoot by more than one whole
    // iteration; they still belong to bucket zero.  NaN also lands here.
    ((iteration + 1) as f64 - nu).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(score(Complex::new(0.0, 0.0)), MAX_ITERATIONS as f64);
    }

    #[test]
    fn bounded_orbits_are_members() {
        // -1 cycles between -1 and 0; -2 sticks at 2; 1/4 is the cusp.
        for c in &[Complex::new(-1.0, 0.0), Complex::new(-2.0, 0.0), Complex::new(0.25, 0.0)] {
            assert_eq!(score(*c), MAX_ITERATIONS as f64, "{:?}", c);
        }
    }

    #[test]
    fn far_points_escape_quickly() {
        let s = score(Complex::new(2.0, 2.0));
        assert!(s < 10.0);
        assert!((s - 1.259).abs() < 0.01, "{}", s);

        for c in &[Complex::new(-2.5, 0.0), Complex::new(0.0, 2.1), Complex::new(1.5, -1.5)] {
            let s = score(*c);
            assert!(s >= 0.0 && s < 10.0, "{:?} scored {}", c, s);
        }
    }

    #[test]
    fn scores_never_go_negative() {
        assert_eq!(score(Complex::new(1000.0, 0.0)), 0.0);
        assert_eq!(score(Complex::new(1.0e200, -1.0e200)), 0.0);
    }

    #[test]
    fn escaped_scores_stay_below_the_cap() {
        // Just outside the main cardioid, slow to escape.
        let s = score(Complex::new(0.26, 0.0));
        assert!(s > 10.0 && s < MAX_ITERATIONS as f64, "{}", s);
        assert!(s.fract() != 0.0);
    }
}
