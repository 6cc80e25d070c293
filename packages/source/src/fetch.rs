//! Fetches a source's POI and boundary documents.
//!
//! The CSV endpoint is tried first; on any failure the `GeoJSON`
//! fallback is fetched instead. The boundary document is best-effort —
//! a miss means the caller falls back to the rectangular bound.

use crate::source_def::SourceDefinition;
use crate::{SourceError, retry};

/// Raw POI document fetched from a source, tagged with which endpoint
/// produced it so the caller picks the matching parse path.
#[derive(Debug, Clone)]
pub enum PoiDocument {
    /// `;`-delimited text from the CSV endpoint (validated path).
    Csv(String),
    /// `FeatureCollection` text from the fallback endpoint
    /// (non-validating re-display path).
    GeoJson(String),
}

/// Fetches the source's POI data, preferring CSV over `GeoJSON`.
///
/// # Errors
///
/// Returns [`SourceError`] when every configured endpoint failed, or
/// when the source configures no POI endpoint at all.
#[allow(clippy::future_not_send)]
pub async fn fetch_pois(
    client: &reqwest::Client,
    source: &SourceDefinition,
) -> Result<PoiDocument, SourceError> {
    if let Some(csv_url) = &source.csv_url {
        match retry::send_text(|| client.get(csv_url)).await {
            Ok(text) => return Ok(PoiDocument::Csv(text)),
            Err(e) => {
                log::warn!(
                    "[{}] CSV fetch failed, falling back to GeoJSON: {e}",
                    source.id
                );
            }
        }
    }

    if let Some(geojson_url) = &source.geojson_url {
        let text = retry::send_text(|| client.get(geojson_url)).await?;
        return Ok(PoiDocument::GeoJson(text));
    }

    Err(SourceError::Fetch {
        message: format!("source {} has no reachable POI endpoint", source.id),
    })
}

/// Fetches the source's precise boundary document, if configured.
///
/// Best-effort: any failure is logged and yields `None` so the caller
/// can fall back to the rectangular bound.
#[allow(clippy::future_not_send)]
pub async fn fetch_boundary(
    client: &reqwest::Client,
    source: &SourceDefinition,
) -> Option<String> {
    let url = source.boundary_url.as_ref()?;
    match retry::send_text(|| client.get(url)).await {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("[{}] boundary fetch failed: {e}", source.id);
            None
        }
    }
}
