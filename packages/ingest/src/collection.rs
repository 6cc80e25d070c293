//! Non-validating conversion paths.
//!
//! Used when a feature collection is re-displayed as-is (no boundary
//! filtering, no issue reporting) and for bulk CSV-to-GeoJSON
//! conversion. Records that cannot be normalized are silently dropped.

use poi_map_poi_models::PointFeature;

use crate::IngestError;
use crate::normalize::normalize_record;

/// Reads point features from a `GeoJSON` `FeatureCollection`.
///
/// Only features with a `Point` geometry and a 2-element finite position
/// are kept; everything else is skipped. No issues are produced on this
/// path.
///
/// # Errors
///
/// Returns [`IngestError`] if the document does not parse or is not a
/// `FeatureCollection`.
pub fn features_from_geojson(text: &str) -> Result<Vec<PointFeature>, IngestError> {
    let geojson: geojson::GeoJson = text.parse()?;
    let geojson::GeoJson::FeatureCollection(fc) = geojson else {
        return Err(IngestError::NotFeatureCollection);
    };
    Ok(fc
        .features
        .iter()
        .filter_map(PointFeature::from_geojson)
        .collect())
}

/// Converts delimited text straight to features, dropping rows that fail
/// normalization.
///
/// # Errors
///
/// Returns [`IngestError`] if the text cannot be parsed into records.
pub fn features_from_csv(text: &str) -> Result<Vec<PointFeature>, IngestError> {
    Ok(crate::delimited::parse_records(text)?
        .iter()
        .filter_map(normalize_record)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_point_features_from_collection() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "title": "Alte Mühle" },
                "geometry": { "type": "Point", "coordinates": [13.29, 52.459] }
            }]
        }"#;
        let features = features_from_geojson(raw).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].properties.title.as_deref(), Some("Alte Mühle"));
    }

    #[test]
    fn skips_non_point_and_short_geometries() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[13.29, 52.459], [13.30, 52.46]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [13.29, 52.459] }
                }
            ]
        }"#;
        let features = features_from_geojson(raw).unwrap();
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn rejects_non_feature_collection() {
        let raw = r#"{ "type": "Point", "coordinates": [13.29, 52.459] }"#;
        assert!(matches!(
            features_from_geojson(raw),
            Err(IngestError::NotFeatureCollection)
        ));
    }

    #[test]
    fn csv_conversion_drops_bad_rows_silently() {
        let features =
            features_from_csv("lat;lon;title\n52.459;13.29;ok\nabc;def;bad\n").unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].properties.title.as_deref(), Some("ok"));
    }

    #[test]
    fn csv_conversion_applies_swap_heuristic() {
        let features = features_from_csv("lat;lon\n13.29;52.459\n").unwrap();
        assert!((features[0].latitude - 52.459).abs() < f64::EPSILON);
        assert!((features[0].longitude - 13.29).abs() < f64::EPSILON);
    }
}
