//! POI map source definition types.
//!
//! Defines the TOML schema for map data sources: where the POI data and
//! boundary documents live and the site's rectangular bound.

use serde::{Deserialize, Serialize};

/// A POI map data source, deserialized from TOML.
///
/// Each source defines the data endpoints for a single site. The CSV URL
/// is the editorial source of truth; the `GeoJSON` URL is the fallback
/// used when the CSV is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Unique source identifier (e.g., `"domaene_dahlem"`).
    pub id: String,
    /// Human-readable site name.
    pub name: String,
    /// URL of the `;`-delimited POI CSV. Tried first when present.
    #[serde(default)]
    pub csv_url: Option<String>,
    /// URL of a POI `GeoJSON` `FeatureCollection`, used as fallback.
    #[serde(default)]
    pub geojson_url: Option<String>,
    /// URL of the precise boundary `GeoJSON`, if the site has one.
    #[serde(default)]
    pub boundary_url: Option<String>,
    /// Rectangular bound as `[minLon, minLat, maxLon, maxLat]`, used when
    /// no precise boundary is available.
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

impl SourceDefinition {
    /// Returns the source identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable site name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_definition() {
        let source: SourceDefinition = toml::de::from_str(
            r#"
            id = "test_site"
            name = "Test Site"
            csv_url = "https://example.org/data/poi.csv"
            geojson_url = "https://example.org/data/poi.geojson"
            boundary_url = "https://example.org/data/bounds.geojson"
            bbox = [13.2877241, 52.4581727, 13.2898741, 52.4601029]
            "#,
        )
        .unwrap();
        assert_eq!(source.id(), "test_site");
        assert!(source.csv_url.is_some());
        assert!((source.bbox.unwrap()[1] - 52.4581727).abs() < f64::EPSILON);
    }

    #[test]
    fn optional_urls_default_to_none() {
        let source: SourceDefinition = toml::de::from_str(
            r#"
            id = "minimal"
            name = "Minimal"
            geojson_url = "https://example.org/data/poi.geojson"
            "#,
        )
        .unwrap();
        assert!(source.csv_url.is_none());
        assert!(source.boundary_url.is_none());
        assert!(source.bbox.is_none());
    }
}
