#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Classification types for choropleth maps.
//!
//! These types describe how a numeric attribute is split into ordered bins:
//! the [`ClassMethod`] used, the resulting [`Boundaries`], and the
//! per-feature bin assignment bundled in a [`ClassificationResult`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Strategy used to compute bin boundaries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClassMethod {
    /// Splits the value range into slices of equal width.
    EqualInterval,
    /// Splits the sorted values into groups of roughly equal count.
    Quantile,
}

impl ClassMethod {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::EqualInterval, Self::Quantile]
    }

    /// Human-readable name for menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EqualInterval => "Equal interval",
            Self::Quantile => "Quantile",
        }
    }
}

/// Ordered bin breakpoints.
///
/// `n` classes are described by `n + 1` boundaries; class `i` spans
/// `boundaries[i]..=boundaries[i + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boundaries(Vec<f64>);

impl Boundaries {
    /// Wraps raw breakpoints without reordering them.
    #[must_use]
    pub const fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Returns the breakpoints sorted ascending.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.0.sort_by(f64::total_cmp);
        self
    }

    /// The raw breakpoints.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of classes these breakpoints describe.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Iterates over the `(low, high)` edges of each class.
    pub fn ranges(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Legend labels, one per class, with both edges to two decimals.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.ranges()
            .map(|(low, high)| format!("{low:.2} - {high:.2}"))
            .collect()
    }
}

impl From<Vec<f64>> for Boundaries {
    fn from(value: Vec<f64>) -> Self {
        Self::new(value)
    }
}

/// Output of one classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Attribute that was classified.
    pub attribute: String,
    /// Strategy that produced the boundaries.
    pub method: ClassMethod,
    /// Sorted breakpoints.
    pub boundaries: Boundaries,
    /// Bin index per feature, aligned with the input feature order.
    pub bins: Vec<usize>,
}

impl ClassificationResult {
    /// Number of classes.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.boundaries.num_classes()
    }

    /// Number of features that fell into each class.
    #[must_use]
    pub fn bin_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_classes()];
        for &bin in &self.bins {
            if let Some(count) = counts.get_mut(bin) {
                *count += 1;
            }
        }
        counts
    }
}
