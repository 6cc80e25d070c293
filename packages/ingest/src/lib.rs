#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point-of-interest ingestion pipeline.
//!
//! Turns a delimited text source (or a `GeoJSON` feature collection) into
//! canonical [`poi_map_poi_models::PointFeature`]s. The validated path
//! runs every record through the normalizer and the boundary filter and
//! reports per-row issues; the re-display path in [`collection`] converts
//! without validation.
//!
//! The whole pipeline is synchronous and stateless: each call recomputes
//! from scratch from the input text and the boundary it is given.

pub mod collection;
pub mod delimited;
pub mod normalize;
pub mod validate;

/// Errors that can occur while parsing a source into records.
///
/// These are pass-level failures (the source could not be parsed at all);
/// per-record problems never surface here — they become
/// [`poi_map_ingest_models::Issue`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The delimited text could not be parsed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The document is not valid `GeoJSON`.
    #[error("GeoJSON parse error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The document parsed but is not a `FeatureCollection`.
    #[error("expected a GeoJSON FeatureCollection")]
    NotFeatureCollection,
}
