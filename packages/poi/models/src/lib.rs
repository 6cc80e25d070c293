#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical point-of-interest feature types.
//!
//! A [`PointFeature`] is the unit of output of the ingestion pipeline:
//! a finite (longitude, latitude) pair plus the recognized descriptive
//! properties. Conversion to and from `GeoJSON` features lives here so
//! every consumer serializes the same way.

use serde::{Deserialize, Serialize};

/// A single point of interest with geographic coordinates.
///
/// Coordinates are always finite: construction goes through
/// [`PointFeature::new`], which rejects non-finite values. A record whose
/// coordinates cannot be parsed never becomes a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    /// Longitude in degrees (GeoJSON x).
    pub longitude: f64,
    /// Latitude in degrees (GeoJSON y).
    pub latitude: f64,
    /// Descriptive properties; absent fields are omitted, never empty
    /// strings.
    pub properties: PoiProperties,
}

impl PointFeature {
    /// Builds a feature from a (longitude, latitude) pair.
    ///
    /// Returns `None` if either coordinate is non-finite.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64, properties: PoiProperties) -> Option<Self> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return None;
        }
        Some(Self {
            longitude,
            latitude,
            properties,
        })
    }

    /// Converts this feature into a `GeoJSON` `Feature` with a `Point`
    /// geometry at `[longitude, latitude]`.
    ///
    /// Properties that are `None` do not appear in the output object, so
    /// downstream display logic can distinguish "no data" from "empty
    /// string".
    #[must_use]
    pub fn to_geojson(&self) -> geojson::Feature {
        let properties = match serde_json::to_value(&self.properties) {
            Ok(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        };
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                self.longitude,
                self.latitude,
            ]))),
            id: None,
            properties,
            foreign_members: None,
        }
    }

    /// Reads a feature back from a `GeoJSON` `Feature`.
    ///
    /// Accepts only `Point` geometries with a 2-element finite position.
    /// Recognized properties are extracted; unknown keys are ignored.
    /// Returns `None` for anything else.
    #[must_use]
    pub fn from_geojson(feature: &geojson::Feature) -> Option<Self> {
        let geometry = feature.geometry.as_ref()?;
        let geojson::Value::Point(position) = &geometry.value else {
            return None;
        };
        if position.len() != 2 {
            return None;
        }
        let properties = feature.properties.as_ref().map_or_else(
            || Some(PoiProperties::default()),
            |map| serde_json::from_value(serde_json::Value::Object(map.clone())).ok(),
        )?;
        Self::new(position[0], position[1], properties)
    }
}

/// Builds a `GeoJSON` `FeatureCollection` from a list of features.
#[must_use]
pub fn to_feature_collection(features: &[PointFeature]) -> geojson::FeatureCollection {
    geojson::FeatureCollection {
        bbox: None,
        features: features.iter().map(PointFeature::to_geojson).collect(),
        foreign_members: None,
    }
}

/// Recognized descriptive properties of a point of interest.
///
/// Bilingual fields carry the `_en` suffix for the English variant; the
/// unsuffixed field holds the primary-language (German) text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiProperties {
    /// Category used for marker styling and filtering (e.g. "Historie").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Short subject line shown above the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// English subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_en: Option<String>,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// English display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// Body text (plain text, may contain line breaks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// English body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_en: Option<String>,
    /// Optional trivia line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funfact: Option<String>,
    /// English trivia line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funfact_en: Option<String>,
    /// URL of the primary image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// External link for further reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Photo list consumed by the generic photo renderer. When `image` is
    /// set during normalization, a single-element list with that URL is
    /// synthesized here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
}

/// A photo reference with an optional label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Image URL.
    pub url: String,
    /// Optional caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Photo {
    /// A photo with no label.
    #[must_use]
    pub const fn from_url(url: String) -> Self {
        Self { url, label: None }
    }
}
