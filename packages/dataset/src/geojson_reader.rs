//! `GeoJSON` feature collection reader.

use std::path::Path;

use choropleth_feature_models::{AttributeValue, Feature, Properties};
use geojson::{GeoJson, JsonObject};

use crate::{DatasetError, polygonal_geometry};

/// Reads and parses a `.geojson` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid polygon
/// feature collection.
pub fn read_geojson(path: &Path) -> Result<Vec<Feature>, DatasetError> {
    let contents = std::fs::read_to_string(path)?;
    parse_geojson(&contents)
}

/// Parses a `GeoJSON` document into features.
///
/// Accepts a `FeatureCollection` or a single `Feature`.
///
/// # Errors
///
/// Returns an error if the document is malformed, is a bare geometry, or
/// contains a feature without polygonal geometry.
pub fn parse_geojson(contents: &str) -> Result<Vec<Feature>, DatasetError> {
    let features = match contents.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => return Err(DatasetError::NotAFeatureCollection),
    };

    features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            let geometry = feature
                .geometry
                .ok_or(DatasetError::MissingGeometry { index })?;
            let geometry: geo::Geometry<f64> = geometry.try_into()?;

            Ok(Feature::new(
                polygonal_geometry(index, geometry)?,
                feature.properties.map(properties_from_json).unwrap_or_default(),
            ))
        })
        .collect()
}

fn properties_from_json(object: JsonObject) -> Properties {
    object
        .into_iter()
        .map(|(name, value)| (name, attribute_from_json(value)))
        .collect()
}

fn attribute_from_json(value: serde_json::Value) -> AttributeValue {
    match value {
        serde_json::Value::Null => AttributeValue::Null,
        serde_json::Value::Bool(b) => AttributeValue::Bool(b),
        serde_json::Value::Number(n) => n.as_f64().map_or(AttributeValue::Null, AttributeValue::Number),
        serde_json::Value::String(s) => AttributeValue::Text(s),
        // Nested values keep their JSON text so they still show up as
        // (non-numeric) attributes.
        other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
            AttributeValue::Text(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use choropleth_feature_models::GeometryKind;

    use super::*;

    const BLOCK_GROUPS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
                },
                "properties": {"GEOID": "390490001001", "White": 812, "Black": null}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[2, 0], [3, 0], [3, 1], [2, 0]]],
                        [[[4, 0], [5, 0], [5, 1], [4, 0]]]
                    ]
                },
                "properties": {"GEOID": "390490001002", "White": 97.5, "Urban": true}
            }
        ]
    }"#;

    #[test]
    fn parses_feature_collection() {
        let features = parse_geojson(BLOCK_GROUPS).unwrap();
        assert_eq!(features.len(), 2);

        assert_eq!(features[0].geometry.kind(), GeometryKind::Polygon);
        assert_eq!(features[1].geometry.kind(), GeometryKind::MultiPolygon);
        assert_eq!(features[1].geometry.polygons().len(), 2);
    }

    #[test]
    fn converts_property_types() {
        let features = parse_geojson(BLOCK_GROUPS).unwrap();

        assert_eq!(
            features[0].attribute("White"),
            Some(&AttributeValue::Number(812.0))
        );
        assert_eq!(features[0].attribute("Black"), Some(&AttributeValue::Null));
        assert_eq!(
            features[0].attribute("GEOID"),
            Some(&AttributeValue::Text("390490001001".to_string()))
        );
        assert_eq!(features[1].attribute("Urban"), Some(&AttributeValue::Bool(true)));
    }

    #[test]
    fn keeps_property_order() {
        let features = parse_geojson(BLOCK_GROUPS).unwrap();

        let names: Vec<&str> = features[0].attribute_names().collect();
        assert_eq!(names, ["GEOID", "White", "Black"]);
    }

    #[test]
    fn accepts_single_feature() {
        let doc = r#"{
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]},
            "properties": null
        }"#;
        let features = parse_geojson(doc).unwrap();
        assert_eq!(features.len(), 1);
        assert!(features[0].properties.is_empty());
    }

    #[test]
    fn rejects_bare_geometry() {
        let doc = r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}"#;
        assert!(matches!(
            parse_geojson(doc),
            Err(DatasetError::NotAFeatureCollection)
        ));
    }

    #[test]
    fn rejects_point_features() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {}}
            ]
        }"#;
        assert!(matches!(
            parse_geojson(doc),
            Err(DatasetError::UnsupportedGeometry {
                index: 0,
                kind: "Point"
            })
        ));
    }

    #[test]
    fn rejects_missing_geometry() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "geometry": null, "properties": {"White": 1}}]
        }"#;
        assert!(matches!(
            parse_geojson(doc),
            Err(DatasetError::MissingGeometry { index: 0 })
        ));
    }
}
