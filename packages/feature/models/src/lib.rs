#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Polygon feature types shared across the choropleth toolchain.
//!
//! A [`Feature`] is one polygonal region plus its attribute table row. The
//! dataset adapter produces them, the classifier reads one numeric attribute
//! out of them, and the renderer draws their geometry.

use geo::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The geometry kinds a choropleth can shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum GeometryKind {
    /// A single polygon (exterior ring plus optional holes).
    Polygon,
    /// A collection of polygons sharing one attribute row.
    MultiPolygon,
}

/// Geometry of a single feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    /// A single polygon.
    Polygon(Polygon<f64>),
    /// Several disjoint polygons.
    MultiPolygon(MultiPolygon<f64>),
}

impl FeatureGeometry {
    /// Returns which kind of geometry this is.
    #[must_use]
    pub const fn kind(&self) -> GeometryKind {
        match self {
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Returns the polygons making up this geometry.
    ///
    /// A plain polygon yields a one-element slice.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            Self::Polygon(p) => std::slice::from_ref(p),
            Self::MultiPolygon(mp) => &mp.0,
        }
    }
}

impl From<Polygon<f64>> for FeatureGeometry {
    fn from(value: Polygon<f64>) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPolygon<f64>> for FeatureGeometry {
    fn from(value: MultiPolygon<f64>) -> Self {
        Self::MultiPolygon(value)
    }
}

/// A scalar attribute value from a feature's property table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Explicit null / empty field.
    Null,
    /// Boolean (dBase logical) field.
    Bool(bool),
    /// Any numeric field.
    Number(f64),
    /// Text field.
    Text(String),
}

impl AttributeValue {
    /// Whether the value is [`AttributeValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Interprets the value as a number.
    ///
    /// Booleans map to `1.0`/`0.0` and text is parsed after trimming, since
    /// dBase numeric columns frequently arrive as padded character fields.
    /// Returns `None` for null, for text that is not a number, and for
    /// non-finite values (`NaN`, `inf`).
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
        .filter(|n: &f64| n.is_finite())
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Attribute name to value, in source column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties(Vec<(String, AttributeValue)>);

impl Properties {
    /// Creates an empty attribute row.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets an attribute, keeping its original position if it already exists.
    pub fn insert(&mut self, name: String, value: AttributeValue) {
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Attribute names in column order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AttributeValue)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (name, value) in iter {
            properties.insert(name, value);
        }
        properties
    }
}

/// One region of the dataset: its geometry and attribute row.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Region outline.
    pub geometry: FeatureGeometry,
    /// Attribute table row.
    pub properties: Properties,
}

impl Feature {
    /// Creates a feature from its parts.
    #[must_use]
    pub fn new(geometry: impl Into<FeatureGeometry>, properties: Properties) -> Self {
        Self {
            geometry: geometry.into(),
            properties,
        }
    }

    /// Looks up a single attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.properties.get(name)
    }

    /// Returns the attribute names of this feature in column order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys()
    }
}
