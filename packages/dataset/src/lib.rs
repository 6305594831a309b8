#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset loading for the choropleth toolchain.
//!
//! Normalizes a `GeoJSON` document or an ESRI shapefile into a uniform
//! sequence of [`Feature`]s. The format is chosen from the file extension;
//! anything other than `.geojson` or `.shp` is rejected with
//! [`DatasetError::UnsupportedFormat`].

pub mod geojson_reader;
pub mod shapefile_reader;

use std::path::{Path, PathBuf};

use choropleth_feature_models::{Feature, FeatureGeometry};
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file extension is neither `.shp` nor `.geojson`.
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The `GeoJSON` document could not be parsed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The `GeoJSON` document is a bare geometry rather than features.
    #[error("GeoJSON document contains no features")]
    NotAFeatureCollection,

    /// The shapefile (or its `.dbf` sidecar) could not be read.
    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    /// The `.dbf` attribute table header could not be read.
    #[error("dBase error: {0}")]
    Dbase(#[from] shapefile::dbase::Error),

    /// A shape record could not be converted into a geometry.
    #[error("Feature {index}: invalid geometry: {message}")]
    Geometry {
        /// Position of the feature in the dataset.
        index: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// A feature has no geometry at all.
    #[error("Feature {index} has no geometry")]
    MissingGeometry {
        /// Position of the feature in the dataset.
        index: usize,
    },

    /// A feature's geometry is not a polygon or multi-polygon.
    #[error("Feature {index} has unsupported geometry type {kind}")]
    UnsupportedGeometry {
        /// Position of the feature in the dataset.
        index: usize,
        /// Name of the geometry type found.
        kind: &'static str,
    },
}

/// Supported on-disk encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DatasetFormat {
    /// `.geojson` feature collection.
    #[strum(serialize = "geojson")]
    GeoJson,
    /// `.shp` with `.shx`/`.dbf` sidecars.
    #[strum(serialize = "shp")]
    Shapefile,
}

impl DatasetFormat {
    /// Picks the format from a path's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnsupportedFormat`] if the extension is
    /// missing or not one of the supported ones.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.to_ascii_lowercase().parse().ok())
            .ok_or_else(|| DatasetError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Loads every feature from the dataset at `path`.
///
/// File handles are opened and closed within this call.
///
/// # Errors
///
/// Returns an error if the format is unsupported, the file cannot be read or
/// parsed, or a feature has a non-polygonal geometry.
pub fn load_features(path: &Path) -> Result<Vec<Feature>, DatasetError> {
    let format = DatasetFormat::from_path(path)?;
    log::debug!("Reading {} as {format}", path.display());

    let features = match format {
        DatasetFormat::GeoJson => geojson_reader::read_geojson(path)?,
        DatasetFormat::Shapefile => shapefile_reader::read_shapefile(path)?,
    };

    log::info!("Loaded {} features from {}", features.len(), path.display());
    Ok(features)
}

/// Narrows a converted geometry down to the polygonal kinds a choropleth
/// can shade.
fn polygonal_geometry(
    index: usize,
    geometry: geo::Geometry<f64>,
) -> Result<FeatureGeometry, DatasetError> {
    let kind = match geometry {
        geo::Geometry::Polygon(p) => return Ok(FeatureGeometry::Polygon(p)),
        geo::Geometry::MultiPolygon(mp) => return Ok(FeatureGeometry::MultiPolygon(mp)),
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "Other",
    };

    Err(DatasetError::UnsupportedGeometry { index, kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/blockgrps.geojson")).unwrap(),
            DatasetFormat::GeoJson
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/blockgrps.shp")).unwrap(),
            DatasetFormat::Shapefile
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("DATA/BLOCKGRPS.SHP")).unwrap(),
            DatasetFormat::Shapefile
        );
    }

    #[test]
    fn rejects_other_extensions() {
        for path in ["data/test.txt", "data/blockgrps.json", "data/noext"] {
            assert!(
                matches!(
                    DatasetFormat::from_path(Path::new(path)),
                    Err(DatasetError::UnsupportedFormat(_))
                ),
                "expected {path} to be rejected"
            );
        }
    }

    #[test]
    fn unsupported_format_fails_before_opening() {
        let err = load_features(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_point_geometry() {
        let err = polygonal_geometry(3, geo::Geometry::Point(geo::Point::new(1.0, 2.0)))
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnsupportedGeometry {
                index: 3,
                kind: "Point"
            }
        ));
    }
}
