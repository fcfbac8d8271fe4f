//! Scan ingestion: plaintext recordings and raw sensor buffers.
//!
//! Two sources feed the [`Cloud`] model:
//! - recorded scan files, one `angle distance` pair per line, with `#`
//!   comment lines;
//! - a read-only view of the range-finder's fixed-point measurement buffer,
//!   converted to degrees and millimeters here.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::cloud::{Cloud, CloudError, Sample};

/// Errors that can occur while loading a scan.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}:{line}: expected 'angle distance', got '{content}'")]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("no usable samples in {0}")]
    Empty(PathBuf),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// One fixed-point measurement record as produced by the sensor driver.
///
/// The angle is a 16.16 fraction of a full circle; the distance is in
/// quarter-millimeters. The core only ever borrows a slice of these, it
/// never talks to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanNode {
    /// Angle as a 16.16 fixed-point fraction of 360 degrees
    pub angle_q16: u32,
    /// Distance in quarter-millimeters
    pub dist_q2: u32,
}

impl ScanNode {
    /// Convert to degrees and millimeters.
    #[inline]
    pub fn to_sample(self) -> Sample {
        Sample::new(
            self.angle_q16 as f32 / 65536.0 * 360.0,
            self.dist_q2 as f32 / 4.0,
        )
    }
}

/// Load a recorded scan from a plaintext file.
///
/// One sample per line, angle then distance, whitespace-separated. Empty
/// lines and lines starting with `#` are ignored. Anything else that does
/// not parse as two floats is a [`LoaderError::Parse`] carrying the line
/// number.
///
/// A file with no usable sample lines is a [`LoaderError::Empty`]; the load
/// aborts rather than hand an empty cloud to the renderer.
pub fn load_cloud<P: AsRef<Path>>(path: P, skip_invalid: bool) -> Result<Cloud> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut samples = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let angle = fields.next().and_then(|s| s.parse::<f32>().ok());
        let distance = fields.next().and_then(|s| s.parse::<f32>().ok());

        match (angle, distance) {
            (Some(angle), Some(distance)) => samples.push(Sample::new(angle, distance)),
            _ => {
                return Err(LoaderError::Parse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    content: trimmed.to_string(),
                })
            }
        }
    }

    Cloud::from_samples(samples, skip_invalid).map_err(|e| match e {
        CloudError::EmptyCloud => LoaderError::Empty(path.to_path_buf()),
    })
}

/// Build a cloud from one snapshot of the sensor's measurement buffer.
///
/// Applies the fixed-point unit conversions and the same `skip_invalid`
/// policy as the file path. An empty (or fully skipped) buffer is a
/// [`CloudError::EmptyCloud`]; a dropped-out sensor frame must not reach
/// the renderer as a zero-count cloud.
pub fn cloud_from_buffer(
    nodes: &[ScanNode],
    skip_invalid: bool,
) -> std::result::Result<Cloud, CloudError> {
    Cloud::from_samples(nodes.iter().map(|n| n.to_sample()), skip_invalid)
}
