#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Front end for the choropleth toolchain.
//!
//! Glues the dataset loader, classifier, and renderer together behind a
//! single error type whose [`ChoroplethError::user_message`] turns the
//! expected input mistakes (bad extension, unknown attribute, unknown
//! method, too many classes) into short messages for the terminal.

pub mod interactive;

use std::path::{Path, PathBuf};

use choropleth_classify::{ClassifyError, ClassifyRequest, classify_features};
use choropleth_classify_models::ClassificationResult;
use choropleth_dataset::DatasetError;
use choropleth_feature_models::Feature;
use choropleth_render::{RenderConfig, RenderError};

/// Any failure of a choropleth run.
#[derive(Debug, thiserror::Error)]
pub enum ChoroplethError {
    /// Loading the dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Classifying the attribute failed.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Rendering or writing the map failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ChoroplethError {
    /// Message to show the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Dataset(DatasetError::UnsupportedFormat(_)) => {
                "Unsupported file format. Use either .shp or .geojson".to_string()
            }
            Self::Classify(ClassifyError::MissingAttribute(_)) => {
                "The attribute was not found".to_string()
            }
            Self::Classify(ClassifyError::UnknownMethod(_)) => {
                "Error: Use either 'equal_interval' or 'quantile'".to_string()
            }
            Self::Classify(ClassifyError::TooManyClasses { .. }) => {
                "Too many classes, try again".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// What to classify and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    /// Attribute to classify.
    pub attribute: String,
    /// Number of classes.
    pub classes: usize,
    /// Method identifier (`equal_interval` or `quantile`).
    pub method: String,
}

/// Loads the dataset at `path`.
///
/// # Errors
///
/// Returns an error if the file format is unsupported or the file cannot be
/// read.
pub fn load_dataset(path: &Path) -> Result<Vec<Feature>, ChoroplethError> {
    Ok(choropleth_dataset::load_features(path)?)
}

/// Attribute names of the first feature, or nothing for an empty dataset.
#[must_use]
pub fn attribute_names(features: &[Feature]) -> Vec<String> {
    features
        .first()
        .map(|f| f.attribute_names().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Classifies `features`, allowing as many classes as the config has colors.
///
/// # Errors
///
/// Returns an error if the request is invalid for this dataset.
pub fn classify(
    features: &[Feature],
    options: &MapOptions,
    config: &RenderConfig,
) -> Result<ClassificationResult, ChoroplethError> {
    let request = ClassifyRequest {
        attribute: options.attribute.clone(),
        num_classes: options.classes,
        method: options.method.clone(),
        capacity: config.capacity(),
    };
    Ok(classify_features(features, &request)?)
}

/// One line per class: its range and how many features fell into it.
#[must_use]
pub fn legend_lines(result: &ClassificationResult) -> Vec<String> {
    result
        .boundaries
        .labels()
        .into_iter()
        .zip(result.bin_counts())
        .map(|(label, count)| format!("{label:<24} {count} features"))
        .collect()
}

/// Default output file: `<input stem>_<attribute>.svg` beside the input.
#[must_use]
pub fn default_output_path(input: &Path, attribute: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("choropleth");
    let attribute: String = attribute
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    input.with_file_name(format!("{stem}_{attribute}.svg"))
}

/// Loads, classifies, and renders a dataset in one go.
///
/// Returns the classification so callers can print the legend.
///
/// # Errors
///
/// Returns an error if any step fails.
pub fn draw_map(
    input: &Path,
    output: &Path,
    options: &MapOptions,
    config: &RenderConfig,
) -> Result<ClassificationResult, ChoroplethError> {
    let features = load_dataset(input)?;
    let result = classify(&features, options, config)?;
    choropleth_render::write_svg(output, &features, &result, config)?;
    Ok(result)
}
