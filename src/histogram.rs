//! The histogram aggregator: how many pixels of a frame fell into
//! each whole-iteration bucket.  The color mapper ranks a pixel by
//! where its bucket sits in the cumulative distribution, so this is
//! built fresh for every frame, after every pixel has been scored.

use MAX_ITERATIONS;

/// Whether the in-set bucket (`MAX_ITERATIONS`) counts toward the
/// total that cumulative frequencies are divided by.  With it in, the
/// total is always the pixel count, and a frame with a lot of black
/// pushes the escaped pixels toward the blue end of the palette.
pub const TOTAL_INCLUDES_MEMBERS: bool = true;

/// Pixel counts per truncated score, `0..=MAX_ITERATIONS`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    counts: Vec<u64>,
    // below[n] is the sum of counts[0..n]; one longer than counts.
    below: Vec<u64>,
    total: u64,
}

/// The bucket a score falls into.
pub fn bucket(score: f64) -> usize {
    (score.floor() as usize).min(MAX_ITERATIONS)
}

impl Histogram {
    /// Count every score into its bucket.
    pub fn build(scores: &[f64]) -> Histogram {
        let mut counts = vec![0u64; MAX_ITERATIONS + 1];
        for &score in scores {
            counts[bucket(score)] += 1;
        }

        let mut below = Vec::with_capacity(counts.len() + 1);
        let mut running = 0u64;
        below.push(running);
        for count in &counts {
            running += *count;
            below.push(running);
        }

        let total = if TOTAL_INCLUDES_MEMBERS {
            running
        } else {
            running - counts[MAX_ITERATIONS]
        };
        debug!(
            pixels = scores.len(),
            total,
            members = counts[MAX_ITERATIONS],
            "built histogram"
        );

        Histogram {
            counts,
            below,
            total,
        }
    }

    /// Pixels whose score truncates to `bucket`.
    pub fn count(&self, bucket: usize) -> u64 {
        self.counts.get(bucket).cloned().unwrap_or(0)
    }

    /// Pixels in all buckets strictly below `bucket`.
    pub fn count_below(&self, bucket: usize) -> u64 {
        self.below[bucket.min(self.counts.len())]
    }

    /// The denominator for cumulative frequencies.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// All bucket counts, in bucket order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }
}

/// Build the histogram of a score field, along with its total.
pub fn build_histogram(scores: &[f64]) -> (Histogram, u64) {
    let histogram = Histogram::build(scores);
    let total = histogram.total();
    (histogram, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_to_the_pixel_count() {
        let scores = vec![0.2, 0.9, 1.5, 3.99, 4.0, 999.5, 1000.0, 1000.0];
        let (histogram, total) = build_histogram(&scores);
        assert_eq!(histogram.counts().iter().sum::<u64>(), scores.len() as u64);
        assert_eq!(total, scores.len() as u64);
        assert_eq!(histogram.count(0), 2);
        assert_eq!(histogram.count(1), 1);
        assert_eq!(histogram.count(3), 1);
        assert_eq!(histogram.count(4), 1);
        assert_eq!(histogram.count(999), 1);
        assert_eq!(histogram.count(MAX_ITERATIONS), 2);
    }

    #[test]
    fn cumulative_counts_exclude_the_bucket_itself() {
        let histogram = Histogram::build(&[0.5, 1.5, 1.25, 1000.0]);
        assert_eq!(histogram.count_below(0), 0);
        assert_eq!(histogram.count_below(1), 1);
        assert_eq!(histogram.count_below(2), 3);
        assert_eq!(histogram.count_below(MAX_ITERATIONS), 3);
        assert_eq!(histogram.count_below(MAX_ITERATIONS + 1), 4);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let histogram = Histogram::build(&[-3.0, 5000.0]);
        assert_eq!(histogram.count(0), 1);
        assert_eq!(histogram.count(MAX_ITERATIONS), 1);
        assert_eq!(histogram.count(MAX_ITERATIONS + 1), 0);
    }

    #[test]
    fn empty_field_has_empty_histogram() {
        let (histogram, total) = build_histogram(&[]);
        assert_eq!(total, 0);
        assert!(histogram.counts().iter().all(|&c| c == 0));
    }
}
