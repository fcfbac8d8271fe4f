//! 2D lidar range-scan statistics and raster visualization.
//!
//! This crate provides tools for:
//! - Loading recorded polar scans (plaintext) and raw sensor measurement
//!   buffers into a statistics-carrying [`Cloud`]
//! - Projecting polar samples onto a fixed-size RGBA canvas
//! - Rendering connected-polygon, bar-chart, and labeled-marker plots
//! - Exporting frames as PNG and clouds as plaintext with sequential naming
//!
//! # Example
//!
//! ```no_run
//! use lidar_scanview::config::RenderConfig;
//! use lidar_scanview::core::loaders::load_cloud;
//! use lidar_scanview::render::{render_frame, Canvas, PlotStyle};
//!
//! let cloud = load_cloud("scan.txt", true).unwrap();
//! let config = RenderConfig::default();
//! let mut canvas = Canvas::from_config(&config.canvas);
//! render_frame(
//!     &mut canvas,
//!     &cloud,
//!     PlotStyle::Connected { scale: 0.0, y_offset: 0, lightness: 1.0 },
//!     &config,
//!     true,
//! )
//! .unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod render;

pub use config::RenderConfig;
pub use core::cloud::{Cloud, Sample};
pub use render::{Canvas, PlotStyle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
