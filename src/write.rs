//! Write a stream of query results to CSV or JSON
//!
//! Writers consume the lazy result stream exactly once. Each output row
//! pairs a close approach with its NEO's serialized view; approaches that
//! never resolved to an NEO degrade to their bare designation.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use serde::Serialize;

use crate::core::error::{NeoError, Result};
use crate::core::models::{ApproachRecord, CloseApproach, NeoRecord};

/// Supported output formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick the format from an output path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(NeoError::unsupported_output_format(path)),
        }
    }
}

/// One flat CSV row: the approach's view joined with its NEO's view.
#[derive(Debug, Serialize)]
struct CsvRow {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    designation: String,
    name: String,
    diameter_km: f64,
    potentially_hazardous: bool,
}

const CSV_HEADER: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// One JSON entry: the approach's view with the NEO's view nested under
/// a `neo` key.
#[derive(Debug, Serialize)]
struct JsonEntry {
    #[serde(flatten)]
    approach: ApproachRecord,
    neo: NeoRecord,
}

/// The NEO view for an approach, degraded when the approach never resolved.
fn neo_record(approach: &CloseApproach) -> NeoRecord {
    match approach.neo() {
        Some(neo) => neo.record(),
        None => NeoRecord {
            designation: approach.designation().to_string(),
            name: String::new(),
            diameter_km: f64::NAN,
            potentially_hazardous: false,
        },
    }
}

/// Write results to a file, picking the format from the path's extension.
pub fn write_results<I>(results: I, path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
{
    let path = path.as_ref();
    match OutputFormat::from_path(path)? {
        OutputFormat::Csv => write_to_csv(results, path),
        OutputFormat::Json => write_to_json(results, path),
    }
}

/// Write results to a CSV file with a header row.
pub fn write_to_csv<I>(results: I, path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
{
    write_csv(results, BufWriter::new(File::create(path)?))
}

/// Write results as CSV to any writer.
///
/// The header row is always present, even for an empty result stream.
pub fn write_csv<I, W>(results: I, writer: W) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
    W: io::Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for item in results {
        let approach = item.as_ref();
        let view = approach.record();
        let neo = neo_record(approach);
        csv_writer.serialize(CsvRow {
            datetime_utc: view.datetime_utc,
            distance_au: view.distance_au,
            velocity_km_s: view.velocity_km_s,
            designation: neo.designation,
            name: neo.name,
            diameter_km: neo.diameter_km,
            potentially_hazardous: neo.potentially_hazardous,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write results to a JSON file as a pretty-printed array.
pub fn write_to_json<I>(results: I, path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
{
    write_json(results, BufWriter::new(File::create(path)?))
}

/// Write results as a JSON array to any writer.
///
/// Unknown (`NAN`) measures serialize as `null`.
pub fn write_json<I, W>(results: I, writer: W) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<CloseApproach>,
    W: io::Write,
{
    let entries: Vec<JsonEntry> = results
        .into_iter()
        .map(|item| {
            let approach = item.as_ref();
            JsonEntry {
                approach: approach.record(),
                neo: neo_record(approach),
            }
        })
        .collect();
    serde_json::to_writer_pretty(writer, &entries)?;
    Ok(())
}
