//! Validated ingestion: one full pass over all records of a source.
//!
//! Each record runs through the normalizer and then the boundary filter;
//! failures become per-row issues, never aborts. The caller gets one
//! [`IngestResult`] per pass and owns it exclusively.

use poi_map_boundary::Boundary;
use poi_map_ingest_models::{IngestResult, IngestStats, Issue, IssueReason, RawRecord};

use crate::normalize::normalize_record;

/// Offset from 0-indexed data row to reported row number: rows are
/// reported 1-based and the source carries one header line.
const HEADER_ROW_OFFSET: usize = 2;

/// Runs the validated pipeline over already-parsed records.
///
/// Processing follows source order and the output `features` preserve
/// it. A record failing normalization is recorded as a
/// missing/invalid-coordinates issue; one failing the boundary filter as
/// an outside-bounds issue. `stats.valid + stats.invalid` always equals
/// the number of records given.
#[must_use]
pub fn ingest_records(records: &[RawRecord], boundary: &Boundary) -> IngestResult {
    let mut features = Vec::new();
    let mut issues = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let row = idx + HEADER_ROW_OFFSET;

        let Some(feature) = normalize_record(record) else {
            issues.push(Issue {
                row,
                reason: IssueReason::MissingCoordinates,
            });
            continue;
        };

        if !boundary.accepts(feature.latitude, feature.longitude) {
            issues.push(Issue {
                row,
                reason: IssueReason::OutsideBounds,
            });
            continue;
        }

        features.push(feature);
    }

    if !issues.is_empty() {
        log::warn!(
            "{} of {} record(s) rejected during ingestion",
            issues.len(),
            records.len()
        );
    }

    let stats = IngestStats {
        valid: features.len(),
        invalid: issues.len(),
        issues,
    };
    IngestResult { features, stats }
}

/// Parses delimited text and runs the validated pipeline on it.
///
/// # Errors
///
/// Returns [`crate::IngestError`] only if the text cannot be parsed into
/// records at all; per-record problems are reported in the result's
/// stats.
pub fn ingest_csv(text: &str, boundary: &Boundary) -> Result<IngestResult, crate::IngestError> {
    Ok(ingest_records(
        &crate::delimited::parse_records(text)?,
        boundary,
    ))
}
