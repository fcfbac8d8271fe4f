//! Polar-to-pixel projection and display scale fitting.

use thiserror::Error;

use super::cloud::Cloud;

/// Errors that can occur when deriving a display scale.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Auto-fit requested for a cloud with no positive-distance sample.
    #[error("cannot auto-fit scale: cloud has no valid distance sample")]
    InvalidScale,
}

/// Fraction of the canvas height the farthest return is fitted to.
const FIT_FACTOR: f32 = 0.7;

/// Project a polar sample onto integer pixel coordinates.
///
/// Angle 0 points along the positive y-axis of the raster (via the cosine
/// term) and increasing angles sweep clockwise. `scale` is pixels per
/// millimeter; `origin` is the canvas position of the sensor.
///
/// Pure and deterministic for identical inputs, up to float rounding.
///
/// # Example
///
/// ```
/// use lidar_scanview::core::transforms::polar_to_pixel;
///
/// assert_eq!(polar_to_pixel(0.0, 100.0, 1.0, (0, 0)), (0, 100));
/// assert_eq!(polar_to_pixel(90.0, 100.0, 1.0, (0, 0)), (100, 0));
/// ```
pub fn polar_to_pixel(angle_deg: f32, distance: f32, scale: f32, origin: (i32, i32)) -> (i32, i32) {
    let rad = angle_deg.to_radians();
    let x = (distance * rad.sin() * scale).round() as i32 + origin.0;
    let y = (distance * rad.cos() * scale).round() as i32 + origin.1;
    (x, y)
}

/// Fit the farthest return to 70% of the canvas height.
///
/// Returns [`TransformError::InvalidScale`] when the cloud holds no valid
/// sample (`max_distance` is 0), which would otherwise divide to infinity.
pub fn auto_scale(cloud: &Cloud, canvas_height: u32) -> Result<f32, TransformError> {
    if cloud.max_distance() <= 0.0 {
        return Err(TransformError::InvalidScale);
    }
    Ok(canvas_height as f32 * FIT_FACTOR / cloud.max_distance())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cloud::Sample;

    #[test]
    fn test_cardinal_directions() {
        // Angle 0 projects purely along the y-axis
        assert_eq!(polar_to_pixel(0.0, 100.0, 1.0, (0, 0)), (0, 100));
        assert_eq!(polar_to_pixel(90.0, 100.0, 1.0, (0, 0)), (100, 0));
        assert_eq!(polar_to_pixel(180.0, 100.0, 1.0, (0, 0)), (0, -100));
        assert_eq!(polar_to_pixel(270.0, 100.0, 1.0, (0, 0)), (-100, 0));
    }

    #[test]
    fn test_scale_and_origin() {
        assert_eq!(polar_to_pixel(0.0, 100.0, 0.5, (10, 20)), (10, 70));
        assert_eq!(polar_to_pixel(90.0, 40.0, 2.0, (-5, 5)), (75, 5));
    }

    #[test]
    fn test_rounding_to_nearest_pixel() {
        // 45 degrees at distance 10: both components 7.071 -> 7
        assert_eq!(polar_to_pixel(45.0, 10.0, 1.0, (0, 0)), (7, 7));
    }

    #[test]
    fn test_auto_scale_fits_to_seventy_percent() {
        let cloud = Cloud::from_samples(
            vec![Sample::new(0.0, 500.0), Sample::new(90.0, 1000.0)],
            false,
        )
        .unwrap();

        let scale = auto_scale(&cloud, 720).unwrap();
        assert!((scale - 720.0 * 0.7 / 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_auto_scale_rejects_cloud_without_returns() {
        let cloud = Cloud::from_samples(vec![Sample::new(0.0, 0.0)], false).unwrap();
        assert!(matches!(
            auto_scale(&cloud, 720),
            Err(TransformError::InvalidScale)
        ));
    }
}
