//! Configuration for lineage rendering.
//!
//! All types implement [`serde::Deserialize`] and default every missing
//! field, so a configuration file only needs to list what it changes.
//!
//! - [`AppConfig`] - Top-level configuration combining lineage and style settings.
//! - [`LineageConfig`] - Grid and connector dimensions of the lineage diagram.
//! - [`StyleConfig`] - Colors and font of rendered output.
//!
//! # Example
//!
//! ```
//! # use living_archive::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().accent_color().is_ok());
//! assert_eq!(config.lineage().column_width(), 80.0);
//! ```

use serde::Deserialize;

use living_archive_core::color::Color;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    lineage: LineageConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(lineage: LineageConfig, style: StyleConfig) -> Self {
        Self { lineage, style }
    }

    pub fn lineage(&self) -> &LineageConfig {
        &self.lineage
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Dimensions of the lineage diagram, in pixels.
///
/// | Field | Default |
/// |-------|---------|
/// | `column_width` | 80 |
/// | `row_height` | 48 |
/// | `connector_length` | 30 |
/// | `padding` | 32 |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Minimum width of one grid column. Widened when a label needs more room.
    column_width: f32,
    /// Height reserved for a node (name and annotation).
    row_height: f32,
    /// Length of a full vertical connector. Bus drops are half as long.
    connector_length: f32,
    /// Margin around the diagram.
    padding: f32,
}

impl LineageConfig {
    pub fn new(column_width: f32, row_height: f32, connector_length: f32, padding: f32) -> Self {
        Self {
            column_width,
            row_height,
            connector_length,
            padding,
        }
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn connector_length(&self) -> f32 {
        self.connector_length
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            column_width: 80.0,
            row_height: 48.0,
            connector_length: 30.0,
            padding: 32.0,
        }
    }
}

/// Colors and font of rendered output.
///
/// Colors are CSS color strings, parsed when used. Unset fields fall back to
/// the archive palette: a near-black stone background, stone lines and text,
/// and an amber accent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    line_color: Option<String>,
    text_color: Option<String>,
    muted_color: Option<String>,
    accent_color: Option<String>,
    font_family: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn background_color(&self) -> Result<Color, String> {
        parse_or(self.background_color.as_deref(), "#0c0a09")
    }

    /// Color of connector lines.
    pub fn line_color(&self) -> Result<Color, String> {
        parse_or(self.line_color.as_deref(), "#57534e")
    }

    /// Color of resolved node names and tier labels.
    pub fn text_color(&self) -> Result<Color, String> {
        parse_or(self.text_color.as_deref(), "#e7e5e4")
    }

    /// Color of unknown nodes and annotations.
    pub fn muted_color(&self) -> Result<Color, String> {
        parse_or(self.muted_color.as_deref(), "#78716c")
    }

    /// Color of the focus underline.
    pub fn accent_color(&self) -> Result<Color, String> {
        parse_or(self.accent_color.as_deref(), "#fbbf24")
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or("monospace")
    }
}

fn parse_or(configured: Option<&str>, fallback: &str) -> Result<Color, String> {
    Color::new(configured.unwrap_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        let lineage = config.lineage();
        assert_eq!(lineage.row_height(), 48.0);
        assert_eq!(lineage.connector_length(), 30.0);
        assert_eq!(lineage.padding(), 32.0);
        assert_eq!(config.style().font_family(), "monospace");
        assert!(config.style().background_color().is_ok());
        assert!(config.style().line_color().is_ok());
        assert!(config.style().text_color().is_ok());
        assert!(config.style().muted_color().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [lineage]
            column_width = 120.0

            [style]
            accent_color = "crimson"
            font_family = "serif"
            "#,
        )
        .unwrap();

        assert_eq!(config.lineage().column_width(), 120.0);
        assert_eq!(config.lineage().connector_length(), 30.0);
        assert_eq!(config.style().font_family(), "serif");
        assert_eq!(
            config.style().accent_color().unwrap(),
            Color::new("crimson").unwrap()
        );
    }

    #[test]
    fn test_invalid_color_is_reported_on_use() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            line_color = "not-a-color"
            "#,
        )
        .unwrap();

        assert!(config.style().line_color().is_err());
        assert!(config.style().text_color().is_ok());
    }
}
