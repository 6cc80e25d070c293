#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! POI map data sources.
//!
//! A source names where a site's POI data lives: a CSV URL (preferred),
//! a `GeoJSON` fallback URL, an optional boundary document, and the
//! site's rectangular bound. Sources are defined as TOML files embedded
//! at compile time. Fetching goes through [`retry::send_text`] so every
//! request gets the bounded retry/backoff/timeout treatment.

pub mod fetch;
pub mod registry;
pub mod retry;
pub mod source_def;

/// Errors that can occur while fetching source data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request completed but the response is unusable.
    #[error("Fetch error: {message}")]
    Fetch {
        /// Description of what went wrong.
        message: String,
    },
}
