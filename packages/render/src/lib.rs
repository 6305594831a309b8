#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Choropleth rendering.
//!
//! Draws classified polygon features as an SVG document, filling each
//! feature with the color of its class and placing a legend in the
//! lower-right corner. Colors and canvas size come from a [`RenderConfig`],
//! which can be loaded from TOML.

pub mod palette;
pub mod svg;

use std::path::Path;

use serde::Deserialize;

pub use palette::Palette;
pub use svg::render_svg;

/// Errors that can occur while rendering a map.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A palette entry is not a `#rrggbb` or `#rgb` hex color.
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    /// The palette has no colors at all.
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    /// The classification has more classes than the palette has colors.
    #[error("Palette has {available} colors but {required} classes were requested")]
    PaletteTooSmall {
        /// Number of classes to color.
        required: usize,
        /// Number of colors in the palette.
        available: usize,
    },

    /// The TOML configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Formatting the document failed.
    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Canvas and styling options for a rendered map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RenderConfig {
    /// Fill colors, lightest class first.
    pub colors: Vec<String>,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Outline color for every polygon.
    pub stroke: String,
    /// Legend title; defaults to the attribute name.
    pub legend_title: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colors: palette::DEFAULT_COLORS.iter().map(ToString::to_string).collect(),
            width: 800,
            height: 600,
            stroke: "#000000".to_string(),
            legend_title: None,
        }
    }
}

impl RenderConfig {
    /// Parses a config from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a color is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RenderError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.palette()?;
        Ok(config)
    }

    /// Reads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loaded render config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Validated palette built from [`Self::colors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the color list is empty or has an invalid entry.
    pub fn palette(&self) -> Result<Palette, RenderError> {
        Palette::new(self.colors.as_slice())
    }

    /// Largest number of classes this config can color.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.colors.len()
    }
}

/// Renders the map and writes it to `path`.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_svg(
    path: &Path,
    features: &[choropleth_feature_models::Feature],
    result: &choropleth_classify_models::ClassificationResult,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let document = render_svg(features, result, config)?;
    std::fs::write(path, document)?;
    log::info!("Choropleth map written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_six_greens() {
        let config = RenderConfig::default();
        assert_eq!(config.capacity(), 6);
        assert_eq!(config.colors[0], "#99d8c9");
        assert_eq!(config.colors[5], "#00441b");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RenderConfig::from_toml_str("width = 1024\nlegend_title = \"Population\"")
            .unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.legend_title.as_deref(), Some("Population"));
        assert_eq!(config.capacity(), 6);
    }

    #[test]
    fn custom_ramp_changes_capacity() {
        let config = RenderConfig::from_toml_str(
            "colors = [\"#fee5d9\", \"#fcbba1\", \"#fc9272\", \"#fb6a4a\", \"#ef3b2c\", \"#cb181d\", \"#99000d\"]",
        )
        .unwrap();
        assert_eq!(config.capacity(), 7);
    }

    #[test]
    fn rejects_bad_colors() {
        assert!(matches!(
            RenderConfig::from_toml_str("colors = [\"green\"]"),
            Err(RenderError::InvalidColor(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("colors = []"),
            Err(RenderError::EmptyPalette)
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            RenderConfig::from_toml_str("width = \"wide\""),
            Err(RenderError::Config(_))
        ));
    }
}
