//! Core data model, ingestion, projection, and export.

pub mod cloud;
pub mod loaders;
pub mod transforms;
pub mod writers;

pub use cloud::{Cloud, CloudError, Sample};
pub use loaders::{cloud_from_buffer, load_cloud, LoaderError, ScanNode};
pub use writers::{ExportSession, WriteError};
