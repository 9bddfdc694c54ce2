//! Configuration for chart rendering

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::{Chart, ChartError, ScaleMode, XAxis, DEFAULT_GLYPHS};
use crate::layout::{Border, BorderError, TextBox};
use crate::size::{Extent, WindowSize};

/// termplot configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chart settings
    pub chart: ChartConfig,
    /// Frame drawn around the chart
    pub frame: FrameConfig,
}

/// Chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart width, in cells or percent of the terminal width
    pub width: Extent,
    /// Chart height, in cells or percent of the terminal height
    pub height: Extent,
    /// Vertical scaling mode
    pub mode: ScaleMode,
    /// Source of x values
    pub x_axis: XAxis,
    /// Series glyphs, one character per series
    pub glyphs: String,
    /// Color each series with ANSI escapes
    pub color: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: Extent::Percent(100),
            height: Extent::Cells(20),
            mode: ScaleMode::default(),
            x_axis: XAxis::default(),
            glyphs: DEFAULT_GLYPHS.iter().collect(),
            color: false,
        }
    }
}

impl ChartConfig {
    /// Build a chart of exactly `width` × `height` cells
    pub fn build(&self, width: usize, height: usize) -> Result<Chart, ChartError> {
        let glyphs: Vec<char> = self.glyphs.chars().collect();
        Ok(Chart::new(width, height)
            .with_mode(self.mode)
            .with_x_axis(self.x_axis)
            .with_glyphs(&glyphs)?)
    }
}

/// Frame settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Draw a frame at all
    pub enabled: bool,
    /// Border glyphs, e.g. `"- │ ┌ ┐ └ ┘"`
    pub border: Border,
    /// Blank columns between border and chart
    pub padding: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            border: Border::default(),
            padding: 1,
        }
    }
}

impl FrameConfig {
    /// Columns and rows the frame adds around its content
    pub fn overhead(&self) -> (usize, usize) {
        if self.enabled {
            (2 * (self.padding + 1), 2)
        } else {
            (0, 0)
        }
    }

    /// Wrap a rendered block of `width` × `height` cells in the frame
    pub fn wrap(&self, text: &str, width: usize, height: usize) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let (dw, dh) = self.overhead();
        TextBox::new(width + dw, height + dh)
            .with_border(self.border)
            .with_padding(self.padding, 0)
            .with_content(text)
            .render()
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from the default location or return the default
    pub fn load_or_default() -> Self {
        // ~/.config/termkit/config.json
        if let Some(path) = default_path() {
            if path.exists() {
                match Self::load(&path) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
                }
            }
        }
        Self::default()
    }

    /// Replace the frame border from a glyph list such as `"- | + + + +"`
    pub fn set_border(&mut self, spec: &str) -> Result<(), ConfigError> {
        self.frame.border = Border::parse(spec)?;
        Ok(())
    }

    /// Build the chart for a terminal of the given size. Percent extents
    /// resolve against the terminal, then the frame (if any) is taken out
    /// so the framed chart still fits.
    pub fn chart(&self, size: WindowSize) -> Result<Chart, ConfigError> {
        let (dw, dh) = self.frame.overhead();
        let width = self
            .chart
            .width
            .resolve(usize::from(size.cols))
            .saturating_sub(dw);
        let height = self
            .chart
            .height
            .resolve(usize::from(size.rows))
            .saturating_sub(dh);

        log::debug!("Chart size {}x{} for terminal {:?}", width, height, size);
        Ok(self.chart.build(width, height)?)
    }
}

/// Default configuration file path
pub fn default_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("termkit")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid chart settings: {0}")]
    Chart(#[from] ChartError),
    #[error("Invalid border: {0}")]
    Border(#[from] BorderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.chart.width, Extent::Percent(100));
        assert_eq!(config.chart.height, Extent::Cells(20));
        assert_eq!(config.chart.mode, ScaleMode::Absolute);
        assert_eq!(config.chart.glyphs, "*+ox#@%&");
        assert!(!config.frame.enabled);
        assert_eq!(config.frame.border.to_string(), "- │ ┌ ┐ └ ┘");
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.chart.mode = ScaleMode::Independent;
        config.chart.width = Extent::Cells(72);
        config.frame.enabled = true;
        config.set_border("- | + + + +").unwrap();
        config.save(&path).unwrap();

        let restored = Config::load(&path).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"chart": {"mode": "relative", "height": {"percent": 50}}}"#)
            .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.chart.mode, ScaleMode::Relative);
        assert_eq!(config.chart.height, Extent::Percent(50));
        assert_eq!(config.chart.glyphs, ChartConfig::default().glyphs);
        assert_eq!(config.frame, FrameConfig::default());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Json(_))));

        let bad_border = dir.path().join("border.json");
        std::fs::write(&bad_border, r#"{"frame": {"border": "- |"}}"#).unwrap();
        assert!(matches!(Config::load(&bad_border), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_set_border_rejects_bad_spec() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_border("ab c d e f g"),
            Err(ConfigError::Border(_))
        ));
        assert_eq!(config.frame.border, Border::default());
    }

    #[test]
    fn test_chart_resolves_percent() {
        let mut config = Config::default();
        config.chart.width = Extent::Percent(50);
        config.chart.height = Extent::Percent(50);

        let chart = config.chart(WindowSize::new(120, 40)).unwrap();
        assert_eq!((chart.width(), chart.height()), (60, 20));
    }

    #[test]
    fn test_chart_leaves_room_for_frame() {
        let mut config = Config::default();
        config.chart.width = Extent::Cells(40);
        config.chart.height = Extent::Cells(12);
        config.frame.enabled = true;

        let chart = config.chart(WindowSize::default()).unwrap();
        assert_eq!((chart.width(), chart.height()), (36, 10));

        let framed = config.frame.wrap(&" ".repeat(36), 36, 1);
        let lines: Vec<&str> = framed.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| crate::layout::display_width(l) == 40));
    }

    #[test]
    fn test_chart_rejects_bad_glyphs() {
        let mut config = Config::default();
        config.chart.glyphs = String::new();
        assert!(matches!(
            config.chart(WindowSize::default()),
            Err(ConfigError::Chart(ChartError::EmptyGlyphs))
        ));
    }

    #[test]
    fn test_frame_disabled_is_passthrough() {
        let frame = FrameConfig::default();
        assert_eq!(frame.wrap("ab\ncd", 2, 2), "ab\ncd");
        assert_eq!(frame.overhead(), (0, 0));
    }
}
