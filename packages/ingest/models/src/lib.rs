#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ingestion input and result types.
//!
//! [`RawRecord`] is the ephemeral untyped row handed to the normalizer;
//! [`IngestResult`] is what one validated pass hands back to the caller.

use std::collections::BTreeMap;
use std::fmt;

use poi_map_poi_models::PointFeature;
use serde::{Deserialize, Serialize};

/// One untyped source record: column name to string value.
///
/// Lookup is case-insensitive; keys are normalized to lowercase when
/// inserted. Produced by the CSV parser, consumed once by the normalizer,
/// then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    /// Stores a field value under the trimmed, lowercased column name.
    pub fn insert(&mut self, key: &str, value: String) {
        self.fields.insert(key.trim().to_lowercase(), value);
    }

    /// Looks up a field by column name, case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::default();
        for (key, value) in iter {
            record.insert(key.as_ref(), value.into());
        }
        record
    }
}

/// Why a record was rejected during validated ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueReason {
    /// The coordinate columns were absent or did not parse to finite
    /// numbers.
    #[serde(rename = "missing/invalid coordinates")]
    MissingCoordinates,
    /// The coordinates parsed but lie outside the operative boundary.
    #[serde(rename = "coordinates outside bounds")]
    OutsideBounds,
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCoordinates => f.write_str("missing/invalid coordinates"),
            Self::OutsideBounds => f.write_str("coordinates outside bounds"),
        }
    }
}

/// One rejected record: its source row and the reason.
///
/// `row` is the 1-based row number in the source file, adjusted for the
/// header line (data row 0 reports as row 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Header-adjusted 1-based source row number.
    pub row: usize,
    /// Rejection reason.
    pub reason: IssueReason,
}

/// Acceptance/rejection summary for one ingestion pass.
///
/// Invariant: `valid + invalid` equals the total number of records
/// processed, `valid == features.len()` and `invalid == issues.len()` of
/// the owning [`IngestResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of records that became features.
    pub valid: usize,
    /// Number of records rejected with an issue.
    pub invalid: usize,
    /// Rejections in source order.
    pub issues: Vec<Issue>,
}

/// Output of one validated ingestion pass.
///
/// Created fresh per call and owned exclusively by the caller; nothing
/// persists across passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestResult {
    /// Accepted features in source order.
    pub features: Vec<PointFeature>,
    /// Acceptance/rejection summary.
    pub stats: IngestStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_lookup_is_case_insensitive() {
        let record: RawRecord = [("Latitude", "52.459"), ("LON", "13.29")].into_iter().collect();
        assert_eq!(record.get("latitude"), Some("52.459"));
        assert_eq!(record.get("Lon"), Some("13.29"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn raw_record_trims_keys() {
        let record: RawRecord = [(" title ", "Alte Mühle")].into_iter().collect();
        assert_eq!(record.get("title"), Some("Alte Mühle"));
    }

    #[test]
    fn issue_reasons_render_canonical_strings() {
        assert_eq!(
            IssueReason::MissingCoordinates.to_string(),
            "missing/invalid coordinates"
        );
        assert_eq!(
            IssueReason::OutsideBounds.to_string(),
            "coordinates outside bounds"
        );
    }

    #[test]
    fn issue_reason_serializes_as_reason_string() {
        let json = serde_json::to_string(&IssueReason::OutsideBounds).unwrap();
        assert_eq!(json, "\"coordinates outside bounds\"");
    }
}
