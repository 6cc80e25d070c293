//! Normalizes one raw record into a canonical point feature.
//!
//! Field aliasing is an explicit ordered list of column names per
//! canonical property, queried first-match-wins. Coordinate parsing
//! tolerates a comma decimal separator and self-corrects the common
//! swapped-column data-entry error.

use poi_map_ingest_models::RawRecord;
use poi_map_poi_models::{Photo, PoiProperties, PointFeature};

/// Columns read for latitude, in priority order.
const LATITUDE_ALIASES: &[&str] = &["latitude", "lat", "y"];
/// Columns read for longitude, in priority order.
const LONGITUDE_ALIASES: &[&str] = &["longitude", "lon", "long", "lng", "x"];

const CATEGORY_ALIASES: &[&str] = &["category"];
const SUBJECT_ALIASES: &[&str] = &["subject"];
const SUBJECT_EN_ALIASES: &[&str] = &["subject_en"];
const TITLE_ALIASES: &[&str] = &["title", "name"];
const TITLE_EN_ALIASES: &[&str] = &["title_en", "name_en"];
const TEXT_ALIASES: &[&str] = &["text", "desc", "description"];
const TEXT_EN_ALIASES: &[&str] = &["text_en", "desc_en", "description_en"];
const FUNFACT_ALIASES: &[&str] = &["funfact"];
const FUNFACT_EN_ALIASES: &[&str] = &["funfact_en"];
const IMAGE_ALIASES: &[&str] = &["image"];
const LINK_ALIASES: &[&str] = &["link", "website", "url"];

/// Absolute-degree threshold of the coordinate-order heuristic.
///
/// The deployment region sits near lat 52° / lon 13°, so a value pair
/// with |lat| at or below this and |lon| at or above it can only be the
/// swapped-columns entry error. The threshold encodes the region; it
/// would corrupt legitimate equatorial data and is deliberately not
/// configurable.
const SWAP_THRESHOLD_DEGREES: f64 = 35.0;

/// Normalizes one record into a [`PointFeature`].
///
/// Returns `None` when the coordinates are missing or do not parse to
/// finite numbers; the record produces no feature in that case.
#[must_use]
pub fn normalize_record(record: &RawRecord) -> Option<PointFeature> {
    let (latitude, longitude) = coordinates(record)?;
    PointFeature::new(longitude, latitude, extract_properties(record))
}

/// Reads and parses the coordinate pair, applying the swap heuristic.
#[must_use]
pub fn coordinates(record: &RawRecord) -> Option<(f64, f64)> {
    let latitude = first_present(record, LATITUDE_ALIASES).and_then(parse_coordinate)?;
    let longitude = first_present(record, LONGITUDE_ALIASES).and_then(parse_coordinate)?;
    Some(maybe_swap(latitude, longitude))
}

/// Swaps the pair when it matches the "longitude in the latitude column"
/// pattern; in-range pairs pass through untouched.
fn maybe_swap(latitude: f64, longitude: f64) -> (f64, f64) {
    let looks_swapped =
        latitude.abs() <= SWAP_THRESHOLD_DEGREES && longitude.abs() >= SWAP_THRESHOLD_DEGREES;
    if looks_swapped {
        (longitude, latitude)
    } else {
        (latitude, longitude)
    }
}

/// Parses one coordinate, accepting `,` as the decimal separator.
/// Returns `None` for anything that is not a finite number.
fn parse_coordinate(raw: &str) -> Option<f64> {
    let parsed: f64 = raw.trim().replace(',', ".").parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// First alias whose trimmed value is non-empty.
fn first_present<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .find_map(|alias| record.get(alias).map(str::trim).filter(|v| !v.is_empty()))
}

fn field(record: &RawRecord, aliases: &[&str]) -> Option<String> {
    first_present(record, aliases).map(str::to_string)
}

/// Presence-based property extraction: a field is copied only when its
/// trimmed value is non-empty, so downstream display logic can
/// distinguish "no data" from "empty string". An `image` also yields a
/// single-element `photos` list for the generic photo renderer.
fn extract_properties(record: &RawRecord) -> PoiProperties {
    let image = field(record, IMAGE_ALIASES);
    let photos = image.iter().cloned().map(Photo::from_url).collect();

    PoiProperties {
        category: field(record, CATEGORY_ALIASES),
        subject: field(record, SUBJECT_ALIASES),
        subject_en: field(record, SUBJECT_EN_ALIASES),
        title: field(record, TITLE_ALIASES),
        title_en: field(record, TITLE_EN_ALIASES),
        text: field(record, TEXT_ALIASES),
        text_en: field(record, TEXT_EN_ALIASES),
        funfact: field(record, FUNFACT_ALIASES),
        funfact_en: field(record, FUNFACT_EN_ALIASES),
        image,
        link: field(record, LINK_ALIASES),
        photos,
    }
}
