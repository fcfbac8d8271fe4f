//! Exporters: plaintext scan dumps and PNG frame captures.
//!
//! All exports go through an [`ExportSession`], which owns the sequential
//! file numbering for its output directory. The session resumes numbering
//! from whatever is already on disk, so repeated runs never overwrite
//! earlier captures.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use regex::Regex;
use thiserror::Error;

use super::cloud::Cloud;
use crate::render::Canvas;

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create the output directory.
    #[error("failed to create output directory '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open a file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to a file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding failed.
    #[error("failed to encode image '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, WriteError>;

fn write_line<W: Write>(writer: &mut W, path: &str, line: &str) -> Result<()> {
    writeln!(writer, "{}", line).map_err(|e| WriteError::WriteFile {
        path: path.to_string(),
        source: e,
    })
}

/// A sequence of exports into one directory.
///
/// Holds the per-export counter that names output files `NNNN-<stem>.<ext>`.
/// The counter is explicit session state owned by the caller, not a hidden
/// process-wide value.
#[derive(Debug)]
pub struct ExportSession {
    dir: PathBuf,
    next_index: usize,
}

impl ExportSession {
    /// Open a session on `dir`, creating it if needed and resuming the
    /// sequence number after the highest `NNNN-` prefix already present.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| WriteError::CreateDirectory {
            path: dir.display().to_string(),
            source: e,
        })?;

        let index_pattern = Regex::new(r"^(\d+)-").unwrap();
        let next_index = fs::read_dir(&dir)
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                let captures = index_pattern.captures(name)?;
                captures.get(1)?.as_str().parse::<usize>().ok()
            })
            .max()
            .map_or(0, |highest| highest + 1);

        Ok(Self { dir, next_index })
    }

    /// The index the next export will use.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    fn claim_path(&mut self, stem: &str, ext: &str) -> PathBuf {
        let path = self.dir.join(format!("{:04}-{}.{}", self.next_index, stem, ext));
        self.next_index += 1;
        path
    }

    /// Write a cloud as plaintext: a four-line identification header, then
    /// one `angle distance` line per retained sample in storage order.
    ///
    /// The output parses back through the file loader unchanged.
    pub fn save_txt(&mut self, cloud: &Cloud, stem: &str) -> Result<PathBuf> {
        let path = self.claim_path(stem, "txt");
        let path_str = path.display().to_string();

        let file = File::create(&path).map_err(|e| WriteError::CreateFile {
            path: path_str.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        write_line(&mut writer, &path_str, "# LIDAR SCAN DATA")?;
        write_line(
            &mut writer,
            &path_str,
            &format!("# Tool: lidar-scanview {}", crate::VERSION),
        )?;
        write_line(&mut writer, &path_str, "# Format: angle [deg], distance [mm]")?;
        write_line(&mut writer, &path_str, "# Angle Distance")?;
        for point in cloud.points() {
            write_line(
                &mut writer,
                &path_str,
                &format!("{} {}", point.angle, point.distance),
            )?;
        }

        writer.flush().map_err(|e| WriteError::WriteFile {
            path: path_str.clone(),
            source: e,
        })?;

        info!("saved {} samples to {}", cloud.count(), path_str);
        Ok(path)
    }

    /// Hand the fully initialized RGBA canvas to the PNG encoder.
    pub fn save_png(&mut self, canvas: &Canvas, stem: &str) -> Result<PathBuf> {
        let path = self.claim_path(stem, "png");

        image::save_buffer(
            &path,
            canvas.data(),
            canvas.width(),
            canvas.height(),
            image::ColorType::Rgba8,
        )
        .map_err(|e| WriteError::Encode {
            path: path.display().to_string(),
            source: e,
        })?;

        info!(
            "saved {}x{} frame to {}",
            canvas.width(),
            canvas.height(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cloud::Sample;
    use crate::core::loaders::load_cloud;
    use tempfile::tempdir;

    fn test_cloud() -> Cloud {
        Cloud::from_samples(
            vec![
                Sample::new(0.0, 120.5),
                Sample::new(90.0, 0.0),
                Sample::new(180.25, 340.0),
            ],
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_save_txt_header_and_rows() {
        let dir = tempdir().unwrap();
        let mut session = ExportSession::open(dir.path()).unwrap();

        let path = session.save_txt(&test_cloud(), "scan").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 7);
        for header_line in &lines[..4] {
            assert!(header_line.starts_with('#'));
        }
        assert_eq!(lines[4], "0 120.5");
        assert_eq!(lines[5], "90 0");
        assert_eq!(lines[6], "180.25 340");
    }

    #[test]
    fn test_txt_round_trip_reproduces_the_cloud() {
        let dir = tempdir().unwrap();
        let mut session = ExportSession::open(dir.path()).unwrap();
        let original = test_cloud();

        let path = session.save_txt(&original, "scan").unwrap();
        let reloaded = load_cloud(&path, false).unwrap();

        assert_eq!(reloaded.points(), original.points());
        assert_eq!(reloaded.max_distance(), original.max_distance());
        assert_eq!(reloaded.min_distance(), original.min_distance());
        assert!((reloaded.mean_distance() - original.mean_distance()).abs() < 1e-4);
    }

    #[test]
    fn test_sequence_numbering_increments() {
        let dir = tempdir().unwrap();
        let mut session = ExportSession::open(dir.path()).unwrap();
        let cloud = test_cloud();

        let first = session.save_txt(&cloud, "scan").unwrap();
        let second = session.save_txt(&cloud, "scan").unwrap();

        assert!(first.file_name().unwrap().to_str().unwrap().starts_with("0000-"));
        assert!(second.file_name().unwrap().to_str().unwrap().starts_with("0001-"));
    }

    #[test]
    fn test_session_resumes_after_existing_exports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("0007-scan.txt"), "# old").unwrap();
        fs::write(dir.path().join("0002-scan.txt"), "# older").unwrap();
        fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

        let session = ExportSession::open(dir.path()).unwrap();
        assert_eq!(session.next_index(), 8);
    }

    #[test]
    fn test_save_png_writes_a_decodable_image() {
        let dir = tempdir().unwrap();
        let mut session = ExportSession::open(dir.path()).unwrap();

        let mut canvas = Canvas::new(16, 8);
        canvas.draw_background(crate::render::Color::new(1, 2, 3));
        let path = session.save_png(&canvas, "frame").unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 8);
    }
}
