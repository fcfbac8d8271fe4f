//! Configuration types for the scan viewer.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 1280;

/// Default canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 720;

/// Bytes per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Configuration for the raster canvas and plot geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Projection origin; None places it at the canvas center
    #[serde(default)]
    pub origin: Option<(i32, i32)>,

    /// Maximum bar length for the bar plot, in pixels
    #[serde(default = "default_max_bar_width")]
    pub max_bar_width: u32,
}

fn default_width() -> u32 {
    CANVAS_WIDTH
}

fn default_height() -> u32 {
    CANVAS_HEIGHT
}

fn default_max_bar_width() -> u32 {
    80
}

impl CanvasConfig {
    /// Projection origin, defaulting to the canvas center.
    pub fn origin(&self) -> (i32, i32) {
        self.origin
            .unwrap_or((self.width as i32 / 2, self.height as i32 / 2))
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            origin: None,
            max_bar_width: default_max_bar_width(),
        }
    }
}

/// Configuration for the color scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Background fill color
    #[serde(default = "default_background")]
    pub background: [u8; 3],

    /// Grid line color
    #[serde(default = "default_grid")]
    pub grid: [u8; 3],

    /// Three anchor colors of the cyclic gradient
    #[serde(default = "default_anchors")]
    pub anchors: [[u8; 3]; 3],
}

fn default_background() -> [u8; 3] {
    [10, 10, 14]
}

fn default_grid() -> [u8; 3] {
    [34, 34, 42]
}

fn default_anchors() -> [[u8; 3]; 3] {
    [[0, 255, 255], [255, 0, 255], [255, 255, 0]]
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid: default_grid(),
            anchors: default_anchors(),
        }
    }
}

/// Main render configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub palette: PaletteConfig,
}

impl RenderConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: RenderConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas_config() {
        let config = CanvasConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.origin(), (640, 360));
        assert_eq!(config.max_bar_width, 80);
    }

    #[test]
    fn test_explicit_origin() {
        let config = CanvasConfig {
            origin: Some((0, 0)),
            ..CanvasConfig::default()
        };
        assert_eq!(config.origin(), (0, 0));
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.yaml");

        let mut config = RenderConfig::default();
        config.canvas.width = 640;
        config.palette.background = [1, 2, 3];
        config.to_yaml(&path).unwrap();

        let loaded = RenderConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded.canvas.width, 640);
        assert_eq!(loaded.canvas.height, 720);
        assert_eq!(loaded.palette.background, [1, 2, 3]);
        assert_eq!(loaded.palette.anchors, default_anchors());
    }
}
