//! Extract unlinked entity collections from the NASA datasets
//!
//! Two loaders, one per source file:
//!
//! - `load_neos` reads the NEO catalog, a CSV file with one row per object.
//!   Only the `pdes`, `name`, `pha`, and `diameter` columns are used; the
//!   rest of the (wide) catalog is ignored.
//! - `load_approaches` reads the close approach dataset, a JSON object whose
//!   `fields` array names the columns of each row in `data`. The `des`,
//!   `cd`, `dist`, and `v_rel` columns are resolved through `fields` rather
//!   than by position.
//!
//! Both return freshly constructed, unlinked collections, ready to hand to
//! `NeoDatabase::new`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::core::error::{NeoError, Result};
use crate::core::models::{CloseApproach, NearEarthObject};

/// The columns of the NEO catalog this crate cares about.
#[derive(Debug, Deserialize)]
struct NeoRow {
    pdes: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    pha: String,
    #[serde(default)]
    diameter: String,
}

/// Load near-Earth objects from a CSV catalog file.
pub fn load_neos(path: impl AsRef<Path>) -> Result<Vec<NearEarthObject>> {
    read_neos(File::open(path)?)
}

/// Read near-Earth objects from CSV data with a header row.
pub fn read_neos<R: io::Read>(reader: R) -> Result<Vec<NearEarthObject>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut neos = Vec::new();
    for row in csv_reader.deserialize() {
        let row: NeoRow = row?;
        let diameter = match row.diameter.trim() {
            "" => None,
            raw => Some(raw.parse::<f64>()?),
        };
        let hazardous = row.pha == "Y";
        neos.push(NearEarthObject::new(
            row.pdes,
            Some(row.name),
            diameter,
            hazardous,
        )?);
    }
    Ok(neos)
}

/// The close approach dataset: column names plus rows of nullable cells.
#[derive(Debug, Deserialize)]
struct CadDataset {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

/// Load close approaches from a JSON dataset file.
pub fn load_approaches(path: impl AsRef<Path>) -> Result<Vec<CloseApproach>> {
    read_approaches(BufReader::new(File::open(path)?))
}

/// Read close approaches from JSON data in the `fields`/`data` layout.
pub fn read_approaches<R: io::Read>(reader: R) -> Result<Vec<CloseApproach>> {
    let dataset: CadDataset = serde_json::from_reader(reader)?;

    let des = column(&dataset.fields, "des")?;
    let cd = column(&dataset.fields, "cd")?;
    let dist = column(&dataset.fields, "dist")?;
    let v_rel = column(&dataset.fields, "v_rel")?;

    let mut approaches = Vec::with_capacity(dataset.data.len());
    for row in &dataset.data {
        approaches.push(CloseApproach::new(
            text(row, des).unwrap_or(""),
            text(row, cd),
            number(row, dist)?,
            number(row, v_rel)?,
        )?);
    }
    Ok(approaches)
}

/// Resolve a column name to its index in the dataset header.
fn column(fields: &[String], name: &str) -> Result<usize> {
    fields
        .iter()
        .position(|field| field == name)
        .ok_or_else(|| NeoError::missing_column(name))
}

/// A cell as trimmed text; null, missing, and empty cells are absent.
fn text(row: &[Value], index: usize) -> Option<&str> {
    row.get(index)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// A cell as a number; the dataset publishes numerics as strings.
fn number(row: &[Value], index: usize) -> Result<Option<f64>> {
    match row.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().parse::<f64>()?)),
        Some(_) => Ok(None),
    }
}
