//! GeoJSON boundary file reading
//!
//! Study-area outlines arrive as GeoJSON (exported from the municipal GIS
//! repository). Geometries convert into geo-types; attributes are kept as
//! loosely-typed properties.

use crate::error::{Error, Result};
use crate::vector::{AttributeValue, Feature, FeatureCollection};
use geojson::{feature::Id, GeoJson, JsonValue};
use std::fs;
use std::path::Path;

/// Read a GeoJSON file into a FeatureCollection.
///
/// Accepts a FeatureCollection, a single Feature, or a bare Geometry.
/// Unconvertible geometries (e.g. `GeometryCollection` nesting the
/// parser cannot flatten) are an error rather than silently dropped.
pub fn read_boundary_file<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let raw = fs::read_to_string(path.as_ref())?;
    let gj: GeoJson = raw
        .parse()
        .map_err(|e| Error::Vector(format!("invalid GeoJSON: {}", e)))?;

    let mut collection = FeatureCollection::new();

    match gj {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                collection.push(convert_feature(feature)?);
            }
        }
        GeoJson::Feature(feature) => {
            collection.push(convert_feature(feature)?);
        }
        GeoJson::Geometry(geometry) => {
            let geom = convert_geometry(geometry)?;
            collection.push(Feature::new(geom));
        }
    }

    Ok(collection)
}

fn convert_feature(feature: geojson::Feature) -> Result<Feature> {
    let geometry = feature.geometry.map(convert_geometry).transpose()?;

    let mut out = Feature {
        geometry,
        properties: Default::default(),
        id: match feature.id {
            Some(Id::String(s)) => Some(s),
            Some(Id::Number(n)) => Some(n.to_string()),
            None => None,
        },
    };

    if let Some(props) = feature.properties {
        for (key, value) in props {
            out.set_property(key, convert_value(&value));
        }
    }

    Ok(out)
}

fn convert_geometry(geometry: geojson::Geometry) -> Result<geo_types::Geometry<f64>> {
    geo_types::Geometry::<f64>::try_from(geometry.value)
        .map_err(|e| Error::Vector(format!("unsupported geometry: {}", e)))
}

fn convert_value(value: &JsonValue) -> AttributeValue {
    match value {
        JsonValue::Null => AttributeValue::Null,
        JsonValue::Bool(b) => AttributeValue::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttributeValue::Int(i)
            } else {
                AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => AttributeValue::String(s.clone()),
        // Arrays and objects are flattened to their JSON text form
        other => AttributeValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BOUNDARY: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "name": "Ergers Pond" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-104.83, 39.96], [-104.81, 39.96],
                    [-104.81, 39.98], [-104.83, 39.98],
                    [-104.83, 39.96]
                ]]
            }
        }]
    }"#;

    #[test]
    fn reads_feature_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boundary.geojson");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(BOUNDARY.as_bytes()).unwrap();

        let fc = read_boundary_file(&path).unwrap();
        assert_eq!(fc.len(), 1);

        let feature = &fc.features[0];
        assert!(matches!(
            feature.geometry,
            Some(geo_types::Geometry::Polygon(_))
        ));
        assert_eq!(
            feature.get_property("name").and_then(|v| v.as_str()),
            Some("Ergers Pond")
        );
    }

    #[test]
    fn rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.geojson");
        fs::write(&path, "{ not geojson").unwrap();

        assert!(read_boundary_file(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_boundary_file("/nonexistent/boundary.geojson").is_err());
    }
}
