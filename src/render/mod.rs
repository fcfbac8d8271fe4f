//! Raster rendering: canvas primitives, color mapping, and scene styles.

pub mod canvas;
pub mod color;
pub mod glyphs;
pub mod scene;

pub use canvas::Canvas;
pub use color::{Color, Gradient};
pub use scene::{render_frame, PlotStyle};

use thiserror::Error;

use crate::core::transforms::TransformError;

/// Errors that can occur while rendering a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A line or ray draw with coincident endpoints; there is no direction
    /// to step along.
    #[error("zero-length segment at ({x}, {y})")]
    DegenerateSegment { x: f32, y: f32 },

    /// Scale auto-fit failed; the cloud has no valid distance sample.
    #[error(transparent)]
    InvalidScale(#[from] TransformError),
}
