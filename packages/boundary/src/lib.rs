#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary geometry and point containment.
//!
//! The operative boundary for one session is either a set of precise
//! polygons loaded from `GeoJSON`, a rectangular bound, or a coarse
//! regional sanity range as the last resort. Ingestion passes the boundary
//! in explicitly; nothing here is ambient or mutable.

use geo::{Coord, LineString, MultiPolygon, Polygon, Rect};

/// Errors that can occur while building a boundary.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    /// The boundary document is not valid `GeoJSON`.
    #[error("GeoJSON parse error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The boundary document parsed but is unusable.
    #[error("Boundary error: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// A containment test failed mid-evaluation.
///
/// Raised when a boundary vertex is non-finite. The filter treats this as
/// "accept" so a broken boundary never discards data.
#[derive(Debug, thiserror::Error)]
#[error("non-finite boundary vertex at ({x}, {y})")]
pub struct GeometryError {
    x: f64,
    y: f64,
}

/// Substituted for an exactly-zero edge divisor in the ray-cast crossing
/// condition, avoiding division by zero without materially moving the
/// edge.
const DIVISOR_EPSILON: f64 = 1e-12;

/// Coarse sanity range for the deployment region, used when neither a
/// precise boundary nor a rectangular bound is available. A last-resort
/// guard, not a real boundary.
const REGION_LAT: (f64, f64) = (52.0, 53.0);
const REGION_LON: (f64, f64) = (13.0, 14.0);

/// The geographic area used to accept or reject points.
///
/// Loaded once per session and treated as immutable; ingestion only ever
/// queries it.
#[derive(Debug, Clone)]
pub enum Boundary {
    /// Precise polygonal boundary: one `MultiPolygon` per source feature.
    /// A point is contained if **any** feature's geometry contains it.
    Polygons(Vec<MultiPolygon<f64>>),
    /// Rectangular bound (inclusive lat/lon range check).
    Rect(Rect<f64>),
    /// Hardcoded coarse range for the deployment region.
    Region,
}

impl Boundary {
    /// Loads a precise boundary from a `GeoJSON` document.
    ///
    /// Accepts a `FeatureCollection`, a single `Feature`, or a bare
    /// geometry. Each feature's `Polygon`/`MultiPolygon` geometry becomes
    /// one entry; other geometry types are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the document does not parse or
    /// contains no polygonal features. Callers fall back to a rectangular
    /// bound in that case.
    pub fn from_geojson_str(raw: &str) -> Result<Self, BoundaryError> {
        let geojson: geojson::GeoJson = raw.parse()?;

        let geometries: Vec<Option<geojson::Geometry>> = match geojson {
            geojson::GeoJson::FeatureCollection(fc) => {
                fc.features.into_iter().map(|f| f.geometry).collect()
            }
            geojson::GeoJson::Feature(feature) => vec![feature.geometry],
            geojson::GeoJson::Geometry(geometry) => vec![Some(geometry)],
        };

        let mut features = Vec::new();
        for geometry in geometries.into_iter().flatten() {
            match to_multi_polygon(geometry) {
                Some(multi_polygon) => features.push(multi_polygon),
                None => log::warn!("Skipping non-polygonal boundary geometry"),
            }
        }

        if features.is_empty() {
            return Err(BoundaryError::Invalid {
                message: "no polygonal features in boundary GeoJSON".to_string(),
            });
        }

        log::info!("Loaded boundary with {} polygonal feature(s)", features.len());
        Ok(Self::Polygons(features))
    }

    /// Builds a rectangular bound from `minLon, minLat, maxLon, maxLat`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if any value is non-finite or the
    /// minimums do not lie strictly below the maximums.
    pub fn rect(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Self, BoundaryError> {
        let all_finite = [min_lon, min_lat, max_lon, max_lat]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite || min_lon >= max_lon || min_lat >= max_lat {
            return Err(BoundaryError::Invalid {
                message: format!(
                    "invalid bbox [{min_lon}, {min_lat}, {max_lon}, {max_lat}]"
                ),
            });
        }
        Ok(Self::Rect(Rect::new(
            Coord::from((min_lon, min_lat)),
            Coord::from((max_lon, max_lat)),
        )))
    }

    /// The coarse regional fallback.
    #[must_use]
    pub const fn region_fallback() -> Self {
        Self::Region
    }

    /// Tests whether the point lies inside the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if a boundary vertex is non-finite. Use
    /// [`Boundary::accepts`] for the fail-open behavior the filter wants.
    pub fn contains(&self, latitude: f64, longitude: f64) -> Result<bool, GeometryError> {
        match self {
            Self::Polygons(features) => {
                for multi_polygon in features {
                    for polygon in &multi_polygon.0 {
                        if polygon_contains(polygon, longitude, latitude)? {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }
            Self::Rect(rect) => Ok(latitude >= rect.min().y
                && latitude <= rect.max().y
                && longitude >= rect.min().x
                && longitude <= rect.max().x),
            Self::Region => Ok(latitude > REGION_LAT.0
                && latitude < REGION_LAT.1
                && longitude > REGION_LON.0
                && longitude < REGION_LON.1),
        }
    }

    /// Containment with the fail-open policy: an evaluation failure
    /// accepts the point and logs a warning, so a geometry bug never
    /// discards data.
    #[must_use]
    pub fn accepts(&self, latitude: f64, longitude: f64) -> bool {
        self.contains(latitude, longitude).unwrap_or_else(|e| {
            log::warn!("Containment test failed for ({latitude}, {longitude}), accepting: {e}");
            true
        })
    }
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`], promoting a
/// plain `Polygon` to a single-member `MultiPolygon`. Returns `None` for
/// non-polygonal geometry types.
fn to_multi_polygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geometry: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geometry {
        geo::Geometry::MultiPolygon(multi_polygon) => Some(multi_polygon),
        geo::Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon])),
        _ => None,
    }
}

/// Polygon rule: inside the outer ring and not inside any hole.
fn polygon_contains(
    polygon: &Polygon<f64>,
    longitude: f64,
    latitude: f64,
) -> Result<bool, GeometryError> {
    if !ring_contains(polygon.exterior(), longitude, latitude)? {
        return Ok(false);
    }
    for hole in polygon.interiors() {
        if ring_contains(hole, longitude, latitude)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Ray-cast point-in-ring test: a ray cast from the point crosses an odd
/// number of ring edges.
fn ring_contains(
    ring: &LineString<f64>,
    longitude: f64,
    latitude: f64,
) -> Result<bool, GeometryError> {
    let points = &ring.0;
    if points.is_empty() {
        return Ok(false);
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let Coord { x: xi, y: yi } = points[i];
        let Coord { x: xj, y: yj } = points[j];
        if !xi.is_finite() || !yi.is_finite() {
            return Err(GeometryError { x: xi, y: yi });
        }

        let mut divisor = yj - yi;
        if divisor == 0.0 {
            divisor = DIVISOR_EPSILON;
        }
        let crosses = ((yi > latitude) != (yj > latitude))
            && longitude < (xj - xi) * (latitude - yi) / divisor + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    Ok(inside)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(points.to_vec())
    }

    fn unit_square() -> Polygon<f64> {
        Polygon::new(
            ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        )
    }

    fn square_with_hole() -> Polygon<f64> {
        Polygon::new(
            ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
            vec![ring(&[
                (1.0, 1.0),
                (3.0, 1.0),
                (3.0, 3.0),
                (1.0, 3.0),
                (1.0, 1.0),
            ])],
        )
    }

    #[test]
    fn point_inside_ring() {
        assert!(ring_contains(unit_square().exterior(), 0.5, 0.5).unwrap());
    }

    #[test]
    fn point_outside_ring() {
        assert!(!ring_contains(unit_square().exterior(), 1.5, 0.5).unwrap());
    }

    #[test]
    fn empty_ring_contains_nothing() {
        assert!(!ring_contains(&ring(&[]), 0.5, 0.5).unwrap());
    }

    #[test]
    fn hole_rejects_point_inside_outer_ring() {
        let polygon = square_with_hole();
        assert!(!polygon_contains(&polygon, 2.0, 2.0).unwrap());
        assert!(polygon_contains(&polygon, 0.5, 0.5).unwrap());
    }

    #[test]
    fn multipolygon_accepts_any_constituent() {
        let far_square = Polygon::new(
            ring(&[
                (10.0, 10.0),
                (11.0, 10.0),
                (11.0, 11.0),
                (10.0, 11.0),
                (10.0, 10.0),
            ]),
            vec![],
        );
        let boundary = Boundary::Polygons(vec![MultiPolygon(vec![unit_square(), far_square])]);
        assert!(boundary.contains(10.5, 10.5).unwrap());
        assert!(boundary.contains(0.5, 0.5).unwrap());
        assert!(!boundary.contains(5.0, 5.0).unwrap());
    }

    #[test]
    fn any_feature_containment() {
        let boundary = Boundary::Polygons(vec![
            MultiPolygon(vec![unit_square()]),
            MultiPolygon(vec![Polygon::new(
                ring(&[
                    (10.0, 10.0),
                    (11.0, 10.0),
                    (11.0, 11.0),
                    (10.0, 11.0),
                    (10.0, 10.0),
                ]),
                vec![],
            )]),
        ]);
        // inside the second feature only
        assert!(boundary.contains(10.5, 10.5).unwrap());
        // outside every feature
        assert!(!boundary.contains(20.0, 20.0).unwrap());
    }

    #[test]
    fn rect_containment_is_inclusive() {
        let boundary = Boundary::rect(13.0, 52.0, 14.0, 53.0).unwrap();
        assert!(boundary.contains(52.5, 13.5).unwrap());
        assert!(boundary.contains(52.0, 13.0).unwrap());
        assert!(!boundary.contains(51.9, 13.5).unwrap());
    }

    #[test]
    fn rect_rejects_invalid_bbox() {
        assert!(Boundary::rect(14.0, 52.0, 13.0, 53.0).is_err());
        assert!(Boundary::rect(f64::NAN, 52.0, 14.0, 53.0).is_err());
    }

    #[test]
    fn region_fallback_is_exclusive() {
        let boundary = Boundary::region_fallback();
        assert!(boundary.contains(52.459, 13.29).unwrap());
        assert!(!boundary.contains(52.0, 13.29).unwrap());
        assert!(!boundary.contains(52.459, 14.0).unwrap());
    }

    #[test]
    fn non_finite_vertex_fails_open() {
        let broken = Polygon::new(
            ring(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0), (0.0, 0.0)]),
            vec![],
        );
        let boundary = Boundary::Polygons(vec![MultiPolygon(vec![broken])]);
        assert!(boundary.contains(0.5, 0.5).is_err());
        assert!(boundary.accepts(0.5, 0.5));
    }

    #[test]
    fn loads_polygon_feature_collection() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "name": "Bounds" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [13.2877, 52.4581],
                        [13.2899, 52.4581],
                        [13.2899, 52.4601],
                        [13.2877, 52.4601],
                        [13.2877, 52.4581]
                    ]]
                }
            }]
        }"#;
        let boundary = Boundary::from_geojson_str(raw).unwrap();
        assert!(boundary.contains(52.459, 13.289).unwrap());
        assert!(!boundary.contains(52.47, 13.289).unwrap());
    }

    #[test]
    fn skips_non_polygonal_features_but_keeps_polygons() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [13.29, 52.459] }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[
                            [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]
                        ]]
                    }
                }
            ]
        }"#;
        let boundary = Boundary::from_geojson_str(raw).unwrap();
        assert!(boundary.contains(0.5, 0.5).unwrap());
    }

    #[test]
    fn rejects_boundary_without_polygons() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [13.29, 52.459] }
            }]
        }"#;
        assert!(Boundary::from_geojson_str(raw).is_err());
    }
}
