//! The scan data model: ordered polar samples plus derived statistics.
//!
//! A [`Cloud`] is built once from a single source (file parse or one sensor
//! buffer snapshot), finalizes its statistics during construction, and is
//! immutable afterwards except for the explicit [`Cloud::rotate`] mutator.
//! A new frame from a live sensor produces a brand-new `Cloud` value.

use thiserror::Error;

/// A single range reading: angle in degrees, distance in millimeters.
///
/// A distance of exactly 0 denotes "no return" from the sensor. Such samples
/// never participate in the min/max extrema; whether they enter the point
/// sequence at all is the caller's `skip_invalid` choice at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Angle in degrees, sweep order
    pub angle: f32,
    /// Distance in millimeters; 0 = invalid reading
    pub distance: f32,
}

impl Sample {
    pub fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }

    /// True when the sensor reported an actual return.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.distance > 0.0
    }
}

/// Errors that can occur while assembling a cloud.
#[derive(Error, Debug)]
pub enum CloudError {
    /// The source yielded no usable samples.
    #[error("scan contains no usable samples")]
    EmptyCloud,
}

/// An ordered polar scan with its descriptive statistics.
///
/// Insertion order is acquisition order: the connected plot draws consecutive
/// points as edges, so the sequence encodes the physical sweep topology.
#[derive(Debug, Clone)]
pub struct Cloud {
    points: Vec<Sample>,
    count: usize,
    max_distance: f32,
    min_distance: f32,
    mean_distance: f32,
    std_distance: f32,
}

impl Cloud {
    /// Build a cloud from raw samples, accumulating statistics in one pass
    /// and finalizing them before returning.
    ///
    /// With `skip_invalid` set, samples at distance 0 are discarded entirely:
    /// they count towards neither the point sequence nor any statistic.
    /// Without it they are retained and DO enter the mean's divisor, matching
    /// the long-standing output of this tool's file format consumers.
    ///
    /// Returns [`CloudError::EmptyCloud`] when no sample is retained, on
    /// every construction path.
    pub fn from_samples<I>(samples: I, skip_invalid: bool) -> Result<Self, CloudError>
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut points: Vec<Sample> = Vec::new();
        let mut max_distance = 0.0f32;
        let mut min_distance = f32::MAX;
        let mut sum = 0.0f32;

        for sample in samples {
            if skip_invalid && sample.distance == 0.0 {
                continue;
            }
            if sample.distance > max_distance {
                max_distance = sample.distance;
            }
            if sample.distance < min_distance && sample.distance > 0.0 {
                min_distance = sample.distance;
            }
            sum += sample.distance;
            points.push(sample);
        }

        if points.is_empty() {
            return Err(CloudError::EmptyCloud);
        }

        let count = points.len();
        let mean_distance = sum / count as f32;
        let std_distance = points
            .iter()
            .map(|p| (mean_distance - p.distance) * (mean_distance - p.distance))
            .sum::<f32>()
            .sqrt();

        Ok(Self {
            points,
            count,
            max_distance,
            min_distance,
            mean_distance,
            std_distance,
        })
    }

    /// Retained samples in sweep order.
    #[inline]
    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    /// Number of retained samples. Always equals `points().len()`.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest valid distance in the scan, 0 when every reading was invalid.
    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Smallest valid (> 0) distance in the scan.
    ///
    /// Seeded with `f32::MAX`; when no valid sample exists the seed is
    /// returned unchanged rather than 0.
    #[inline]
    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Arithmetic mean of the retained distances.
    ///
    /// Invalid (0-distance) samples that were not skipped at build time are
    /// included in the divisor, so a scan with dropouts reads lower than the
    /// mean of its valid returns.
    #[inline]
    pub fn mean_distance(&self) -> f32 {
        self.mean_distance
    }

    /// Spread of the retained distances: the square root of the summed
    /// squared deviations from the mean.
    ///
    /// The sum is NOT divided by the sample count, so this grows with scan
    /// size and is not a textbook standard deviation. Kept as-is for
    /// compatibility with existing consumers of the exported numbers.
    #[inline]
    pub fn std_distance(&self) -> f32 {
        self.std_distance
    }

    /// Rotate the whole scan in place by `delta_deg` degrees.
    ///
    /// Angles reaching 360 wrap by a single subtraction, so callers stepping
    /// a live view must keep `|delta_deg| < 360` per call.
    pub fn rotate(&mut self, delta_deg: f32) {
        for sample in &mut self.points {
            sample.angle += delta_deg;
            if sample.angle >= 360.0 {
                sample.angle -= 360.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pairs(pairs: &[(f32, f32)]) -> Vec<Sample> {
        pairs.iter().map(|&(a, d)| Sample::new(a, d)).collect()
    }

    #[test]
    fn test_uniform_distances() {
        let cloud =
            Cloud::from_samples(sample_pairs(&[(0.0, 50.0), (90.0, 50.0), (180.0, 50.0)]), false)
                .unwrap();

        assert_eq!(cloud.count(), 3);
        assert_eq!(cloud.max_distance(), 50.0);
        assert_eq!(cloud.min_distance(), 50.0);
        assert_eq!(cloud.mean_distance(), 50.0);
        assert_eq!(cloud.std_distance(), 0.0);
    }

    #[test]
    fn test_spread_is_root_of_summed_squares() {
        let cloud =
            Cloud::from_samples(sample_pairs(&[(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)]), false)
                .unwrap();

        assert_eq!(cloud.mean_distance(), 200.0);
        // sqrt(100^2 + 0 + 100^2), not divided by the count
        assert!((cloud.std_distance() - 20_000.0f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_skip_invalid_excludes_from_everything() {
        let samples = sample_pairs(&[(0.0, 100.0), (1.0, 0.0), (2.0, 300.0)]);

        let kept = Cloud::from_samples(samples.clone(), false).unwrap();
        assert_eq!(kept.count(), 3);
        // The dropout stays in the divisor
        assert!((kept.mean_distance() - 400.0 / 3.0).abs() < 1e-3);
        assert_eq!(kept.min_distance(), 100.0);

        let skipped = Cloud::from_samples(samples, true).unwrap();
        assert_eq!(skipped.count(), 2);
        assert_eq!(skipped.mean_distance(), 200.0);
        assert_eq!(skipped.min_distance(), 100.0);
        assert_eq!(skipped.max_distance(), 300.0);
    }

    #[test]
    fn test_all_invalid_keeps_min_seed() {
        let cloud = Cloud::from_samples(sample_pairs(&[(0.0, 0.0), (1.0, 0.0)]), false).unwrap();
        assert_eq!(cloud.max_distance(), 0.0);
        assert_eq!(cloud.min_distance(), f32::MAX);
        assert_eq!(cloud.mean_distance(), 0.0);
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let err = Cloud::from_samples(Vec::new(), false).unwrap_err();
        assert!(matches!(err, CloudError::EmptyCloud));

        // All samples invalid and skipped: also empty
        let err = Cloud::from_samples(sample_pairs(&[(0.0, 0.0)]), true).unwrap_err();
        assert!(matches!(err, CloudError::EmptyCloud));
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let mut cloud =
            Cloud::from_samples(sample_pairs(&[(10.0, 100.0), (350.0, 100.0)]), false).unwrap();
        cloud.rotate(0.0);
        assert_eq!(cloud.points()[0].angle, 10.0);
        assert_eq!(cloud.points()[1].angle, 350.0);
    }

    #[test]
    fn test_rotate_wraps_exactly_once() {
        let mut cloud = Cloud::from_samples(sample_pairs(&[(10.0, 100.0)]), false).unwrap();
        cloud.rotate(360.0);
        // 10 + 360 = 370 wraps by one subtraction back to 10
        assert!((cloud.points()[0].angle - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_crossing_the_seam() {
        let mut cloud =
            Cloud::from_samples(sample_pairs(&[(350.0, 100.0), (10.0, 100.0)]), false).unwrap();
        cloud.rotate(20.0);
        assert!((cloud.points()[0].angle - 10.0).abs() < 1e-4);
        assert!((cloud.points()[1].angle - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_statistics_after_rotation_unchanged() {
        let mut cloud =
            Cloud::from_samples(sample_pairs(&[(0.0, 100.0), (90.0, 200.0)]), false).unwrap();
        let mean = cloud.mean_distance();
        cloud.rotate(45.0);
        assert_eq!(cloud.mean_distance(), mean);
        assert_eq!(cloud.count(), 2);
    }
}
