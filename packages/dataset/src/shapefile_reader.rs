//! ESRI shapefile reader.
//!
//! Geometry comes from the `.shp` file and attributes from the `.dbf`
//! sidecar next to it.

use std::path::Path;

use choropleth_feature_models::{AttributeValue, Feature, Properties};
use shapefile::dbase::{FieldValue, Record};

use crate::{DatasetError, polygonal_geometry};

/// Reads every shape and its attribute record from a shapefile.
///
/// Attributes keep the column order of the `.dbf` header.
///
/// # Errors
///
/// Returns an error if the shapefile or its `.dbf` cannot be opened, a
/// record is corrupt, or a shape is not a polygon.
pub fn read_shapefile(path: &Path) -> Result<Vec<Feature>, DatasetError> {
    let columns = column_names(path)?;
    let mut reader = shapefile::Reader::from_path(path)?;
    let mut features = Vec::new();

    for (index, shape_record) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = shape_record?;
        let geometry = geo::Geometry::<f64>::try_from(shape).map_err(|e| {
            DatasetError::Geometry {
                index,
                message: e.to_string(),
            }
        })?;

        features.push(Feature::new(
            polygonal_geometry(index, geometry)?,
            properties_from_record(&columns, record),
        ));
    }

    log::debug!(
        "Read {} shapes with columns {columns:?} from {}",
        features.len(),
        path.display()
    );
    Ok(features)
}

/// Field names of the `.dbf` sidecar, in header order.
fn column_names(path: &Path) -> Result<Vec<String>, DatasetError> {
    let table = shapefile::dbase::Reader::from_path(path.with_extension("dbf"))?;
    Ok(table
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect())
}

fn properties_from_record(columns: &[String], record: Record) -> Properties {
    let mut fields: Vec<(String, FieldValue)> = record.into_iter().collect();
    fields.sort_by_key(|(name, _)| {
        columns
            .iter()
            .position(|column| column == name)
            .unwrap_or(usize::MAX)
    });

    fields
        .into_iter()
        .map(|(name, value)| (name, attribute_from_field(value)))
        .collect()
}

fn attribute_from_field(value: FieldValue) -> AttributeValue {
    match value {
        FieldValue::Numeric(Some(n)) => AttributeValue::Number(n),
        FieldValue::Float(Some(n)) => AttributeValue::Number(f64::from(n)),
        FieldValue::Integer(n) => AttributeValue::Number(f64::from(n)),
        FieldValue::Double(n) | FieldValue::Currency(n) => AttributeValue::Number(n),
        FieldValue::Character(Some(s)) => AttributeValue::Text(s),
        FieldValue::Memo(s) => AttributeValue::Text(s),
        FieldValue::Logical(Some(b)) => AttributeValue::Bool(b),
        _ => AttributeValue::Null,
    }
}
