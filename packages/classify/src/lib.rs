#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Attribute classification for choropleth maps.
//!
//! Validates a [`ClassifyRequest`] against a set of features, computes class
//! boundaries with the requested [`ClassMethod`], and assigns every feature
//! to a class. The result is a [`ClassificationResult`] the renderer can
//! draw directly.

pub mod assign;
pub mod breaks;

use std::str::FromStr as _;

use choropleth_classify_models::{ClassMethod, ClassificationResult};
use choropleth_feature_models::{AttributeValue, Feature};

pub use assign::assign_bin;

/// Errors that can occur while classifying a dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// The dataset contains no features.
    #[error("The dataset contains no features")]
    NoFeatures,

    /// The requested attribute is absent from the feature schema.
    #[error("The attribute '{0}' was not found")]
    MissingAttribute(String),

    /// The classification method identifier is not recognized.
    #[error("Unknown classification method '{0}': use either 'equal_interval' or 'quantile'")]
    UnknownMethod(String),

    /// Zero classes were requested.
    #[error("The number of classes must be at least 1")]
    InvalidClassCount,

    /// More classes were requested than the color ramp can show.
    #[error("Too many classes ({requested}), the color ramp has {capacity}; try again")]
    TooManyClasses {
        /// Number of classes asked for.
        requested: usize,
        /// Number of colors available.
        capacity: usize,
    },

    /// A feature's attribute value cannot be read as a number.
    #[error("Feature {index}: value '{value}' of attribute '{attribute}' is not numeric")]
    NonNumericValue {
        /// Attribute being classified.
        attribute: String,
        /// Position of the feature in the dataset.
        index: usize,
        /// The offending value.
        value: String,
    },
}

/// Parameters for one classification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyRequest {
    /// Attribute to classify.
    pub attribute: String,
    /// Number of classes wanted.
    pub num_classes: usize,
    /// Method identifier (`equal_interval` or `quantile`).
    pub method: String,
    /// Largest class count the presentation layer can color.
    pub capacity: usize,
}

/// Classifies `features` by the requested attribute.
///
/// Only the first feature is checked for the attribute; later features
/// missing it (or holding null) count as `0`.
///
/// # Errors
///
/// Returns an error if there are no features, the first feature lacks the
/// attribute, the method is unknown, the class count is zero or exceeds the
/// capacity, or a value is not numeric.
pub fn classify_features(
    features: &[Feature],
    request: &ClassifyRequest,
) -> Result<ClassificationResult, ClassifyError> {
    let first = features.first().ok_or(ClassifyError::NoFeatures)?;

    if first
        .attribute(&request.attribute)
        .is_none_or(AttributeValue::is_null)
    {
        return Err(ClassifyError::MissingAttribute(request.attribute.clone()));
    }

    let method = ClassMethod::from_str(&request.method)
        .map_err(|_| ClassifyError::UnknownMethod(request.method.clone()))?;

    if request.num_classes == 0 {
        return Err(ClassifyError::InvalidClassCount);
    }
    if request.num_classes > request.capacity {
        return Err(ClassifyError::TooManyClasses {
            requested: request.num_classes,
            capacity: request.capacity,
        });
    }

    let values = attribute_values(features, &request.attribute)?;

    let boundaries = breaks::compute(method, &values, request.num_classes)
        .ok_or(ClassifyError::NoFeatures)?
        .sorted();
    log::info!(
        "Classified '{}' by {method} into {} classes: {:?}",
        request.attribute,
        boundaries.num_classes(),
        boundaries.as_slice()
    );

    let bins = values
        .iter()
        .map(|&value| assign_bin(value, boundaries.as_slice()))
        .collect();

    Ok(ClassificationResult {
        attribute: request.attribute.clone(),
        method,
        boundaries,
        bins,
    })
}

/// Reads `attribute` from every feature as a number, in feature order.
///
/// Absent and null values read as `0`.
///
/// # Errors
///
/// Returns [`ClassifyError::NonNumericValue`] for values that cannot be
/// interpreted as numbers.
pub fn attribute_values(features: &[Feature], attribute: &str) -> Result<Vec<f64>, ClassifyError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| match feature.attribute(attribute) {
            None | Some(AttributeValue::Null) => Ok(0.0),
            Some(value) => value.as_number().ok_or_else(|| ClassifyError::NonNumericValue {
                attribute: attribute.to_string(),
                index,
                value: value.to_string(),
            }),
        })
        .collect()
}
