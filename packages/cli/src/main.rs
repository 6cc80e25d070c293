#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the POI map data toolchain.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use poi_map_boundary::Boundary;
use poi_map_ingest::{collection, validate};
use poi_map_ingest_models::IngestResult;
use poi_map_poi_models::{PointFeature, to_feature_collection};
use poi_map_source::fetch::{self, PoiDocument};
use poi_map_source::registry;

#[derive(Parser)]
#[command(name = "poi_map_cli", about = "POI map data toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all configured map sources
    Sources,
    /// Validate a local POI CSV file and report per-row issues
    Validate {
        /// Path to the `;`-delimited CSV file
        csv: PathBuf,
        /// Boundary `GeoJSON` file for precise containment
        #[arg(long)]
        boundary: Option<PathBuf>,
        /// Rectangular bound as `minLon,minLat,maxLon,maxLat`, used when
        /// no boundary file is given
        #[arg(long)]
        bbox: Option<String>,
        /// Write accepted features as `GeoJSON` to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Convert a POI CSV file to GeoJSON without validation
    Convert {
        /// Path to the `;`-delimited CSV file
        csv: PathBuf,
        /// Output `GeoJSON` path
        #[arg(long)]
        output: PathBuf,
    },
    /// Fetch a configured source, validate it, and report
    Fetch {
        /// Source identifier (e.g., "`domaene_dahlem`")
        source: String,
        /// Write accepted features as `GeoJSON` to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sources => {
            let sources = registry::all_sources();
            println!("{:<20} NAME", "ID");
            println!("{}", "-".repeat(50));
            for source in &sources {
                println!("{:<20} {}", source.id(), source.name());
            }
        }
        Commands::Validate {
            csv,
            boundary,
            bbox,
            output,
        } => {
            let text = fs::read_to_string(&csv)?;
            let boundary_text = boundary.map(fs::read_to_string).transpose()?;
            let bbox = bbox.as_deref().map(parse_bbox).transpose()?;
            let boundary = resolve_boundary(boundary_text, bbox);

            let result = validate::ingest_csv(&text, &boundary)?;
            print_result(&result);
            if let Some(path) = output {
                write_features(&path, &result.features)?;
            }
        }
        Commands::Convert { csv, output } => {
            let text = fs::read_to_string(&csv)?;
            let features = collection::features_from_csv(&text)?;
            write_features(&output, &features)?;
            println!(
                "Wrote {} with {} feature(s)",
                output.display(),
                features.len()
            );
        }
        Commands::Fetch { source, output } => {
            let sources = registry::all_sources();
            let src = sources
                .iter()
                .find(|s| s.id() == source)
                .ok_or_else(|| format!("Unknown source: {source}"))?;

            let client = reqwest::Client::new();
            let boundary_text = fetch::fetch_boundary(&client, src).await;
            let boundary = resolve_boundary(boundary_text, src.bbox);

            match fetch::fetch_pois(&client, src).await? {
                PoiDocument::Csv(text) => {
                    let result = validate::ingest_csv(&text, &boundary)?;
                    print_result(&result);
                    if let Some(path) = output {
                        write_features(&path, &result.features)?;
                    }
                }
                PoiDocument::GeoJson(text) => {
                    let features = collection::features_from_geojson(&text)?;
                    println!(
                        "{} feature(s) from GeoJSON fallback (not validated)",
                        features.len()
                    );
                    if let Some(path) = output {
                        write_features(&path, &features)?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Picks the operative boundary: precise polygons when a usable document
/// is at hand, else the rectangular bound, else the coarse regional
/// range.
fn resolve_boundary(boundary_text: Option<String>, bbox: Option<[f64; 4]>) -> Boundary {
    if let Some(text) = boundary_text {
        match Boundary::from_geojson_str(&text) {
            Ok(boundary) => return boundary,
            Err(e) => log::warn!("Unusable boundary document, falling back: {e}"),
        }
    }
    if let Some([min_lon, min_lat, max_lon, max_lat]) = bbox {
        match Boundary::rect(min_lon, min_lat, max_lon, max_lat) {
            Ok(boundary) => return boundary,
            Err(e) => log::warn!("Invalid bbox, falling back to regional range: {e}"),
        }
    }
    Boundary::region_fallback()
}

/// Parses a `minLon,minLat,maxLon,maxLat` argument.
fn parse_bbox(raw: &str) -> Result<[f64; 4], Box<dyn std::error::Error>> {
    let parts = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;
    let [min_lon, min_lat, max_lon, max_lat] = parts.as_slice() else {
        return Err(format!(
            "expected 4 comma-separated numbers in bbox, got {}",
            parts.len()
        )
        .into());
    };
    Ok([*min_lon, *min_lat, *max_lon, *max_lat])
}

fn print_result(result: &IngestResult) {
    println!(
        "{} valid, {} invalid",
        result.stats.valid, result.stats.invalid
    );
    for issue in &result.stats.issues {
        println!("  row {}: {}", issue.row, issue.reason);
    }
}

/// Writes features as a pretty-printed `GeoJSON` `FeatureCollection`.
fn write_features(path: &Path, features: &[PointFeature]) -> Result<(), Box<dyn std::error::Error>> {
    let fc = to_feature_collection(features);
    fs::write(path, serde_json::to_string_pretty(&fc)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bbox_argument() {
        let bbox = parse_bbox("13.2877241, 52.4581727, 13.2898741, 52.4601029").unwrap();
        assert!((bbox[0] - 13.2877241).abs() < f64::EPSILON);
        assert!((bbox[3] - 52.4601029).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_wrong_arity_bbox() {
        assert!(parse_bbox("13.28,52.45").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
    }

    #[test]
    fn resolve_boundary_prefers_precise_polygons() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]
                    ]]
                }
            }]
        }"#;
        let boundary = resolve_boundary(Some(raw.to_string()), Some([13.0, 52.0, 14.0, 53.0]));
        assert!(matches!(boundary, Boundary::Polygons(_)));
    }

    #[test]
    fn resolve_boundary_falls_back_to_rect_then_region() {
        let rect = resolve_boundary(None, Some([13.0, 52.0, 14.0, 53.0]));
        assert!(matches!(rect, Boundary::Rect(_)));

        let region = resolve_boundary(Some("not geojson".to_string()), None);
        assert!(matches!(region, Boundary::Region));
    }
}
