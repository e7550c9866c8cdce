//! Theme configuration for the overlay.
//!
//! Loaded once at setup from TOML and re-appliable at any time:
//!
//! ```toml
//! [beat_grid]
//! beat_color = "#a0a0a0"   # "#RRGGBB" or "#AARRGGBB"
//!
//! [labels]
//! font_size = 24.0
//! height_limit = 0.33      # fraction of the waveform breadth
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::paint::Rgba;

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("failed to read theme {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BeatGridTheme {
    #[serde(default)]
    pub beat_grid: BeatGridColors,
    #[serde(default)]
    pub labels: LabelConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeatGridColors {
    /// Color of plain beat lines. Bar and phrase lines use fixed hues.
    #[serde(default = "default_beat_color")]
    pub beat_color: Rgba,
}

/// Bar-number label sizing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelConfig {
    /// Requested glyph size, logical pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Maximum label height as a fraction of the render breadth.
    #[serde(default = "default_height_limit")]
    pub height_limit: f32,
}

impl Default for BeatGridColors {
    fn default() -> Self {
        Self {
            beat_color: default_beat_color(),
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            height_limit: default_height_limit(),
        }
    }
}

fn default_beat_color() -> Rgba {
    Rgba::from_u8(0xa0, 0xa0, 0xa0, 0xff)
}

fn default_font_size() -> f32 {
    24.0
}

fn default_height_limit() -> f32 {
    0.33
}

impl BeatGridTheme {
    pub fn from_toml_str(content: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let theme = Self::from_toml_str(&content)?;
        log::debug!("loaded beat grid theme from {}", path.display());
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let theme = BeatGridTheme::from_toml_str("").unwrap();
        assert_eq!(theme, BeatGridTheme::default());
        assert_eq!(theme.labels.font_size, 24.0);
    }

    #[test]
    fn parses_all_fields() {
        let theme = BeatGridTheme::from_toml_str(
            r##"
            [beat_grid]
            beat_color = "#40ff0000"

            [labels]
            font_size = 12.0
            height_limit = 0.5
            "##,
        )
        .unwrap();
        assert_eq!(theme.beat_grid.beat_color, Rgba::from_u8(255, 0, 0, 0x40));
        assert_eq!(theme.labels, LabelConfig { font_size: 12.0, height_limit: 0.5 });
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let theme = BeatGridTheme::from_toml_str("[labels]\nfont_size = 9.0\n").unwrap();
        assert_eq!(theme.labels.font_size, 9.0);
        assert_eq!(theme.labels.height_limit, 0.33);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = BeatGridTheme::from_toml_str("[beat_grid]\nbeat_color = \"red\"\n").unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)));
        assert!(err.to_string().contains("must start with '#'"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = BeatGridTheme::load("/nonexistent/beatgrid-theme.toml").unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }
}
