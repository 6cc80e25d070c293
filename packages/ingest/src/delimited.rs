//! Delimited text parsing.
//!
//! The POI source format is `;`-delimited with one header row. Headers
//! are matched case-insensitively, so they are trimmed and lowercased
//! here before the rows become [`RawRecord`]s.

use poi_map_ingest_models::RawRecord;

use crate::IngestError;

/// Field delimiter of the POI source format.
const DELIMITER: u8 = b';';

/// Parses delimited text into raw records.
///
/// The first row is the header; each subsequent row becomes one
/// [`RawRecord`] keyed by the normalized header names. Rows shorter than
/// the header leave the trailing fields absent; fields beyond the header
/// are ignored. A UTF-8 BOM on the first header cell is stripped.
///
/// # Errors
///
/// Returns [`IngestError`] if the text cannot be parsed as delimited
/// records at all. Malformed individual values are not an error here —
/// they surface later as normalization issues.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = if i == 0 {
                name.trim_start_matches('\u{feff}')
            } else {
                name
            };
            name.trim().to_lowercase()
        })
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = RawRecord::default();
        for (header, value) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            record.insert(header, value.to_string());
        }
        records.push(record);
    }

    Ok(records)
}
