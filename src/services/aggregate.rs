//! CSV re-aggregation - service layer
//!
//! Walks the output tree and reassembles the per-quarter CSV files for
//! one ticker into a JSON payload, keyed by table kind. Used by the
//! crawl API, not by the crawler itself.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::models::report::TableKind;

/// Collects every matching table under `root`: directories whose path
/// contains both the quarter label and the ticker contribute their CSV
/// files, each mapped to the first kind keyword its name contains.
/// A malformed CSV becomes a single inline error record for its kind
/// rather than failing the whole response.
pub fn collect_tables(root: &Path, stock: &str, quarter: &str) -> Map<String, Value> {
    let mut tables = Map::new();
    walk(root, stock, quarter, &mut tables);
    tables
}

fn walk(dir: &Path, stock: &str, quarter: &str, tables: &mut Map<String, Value>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("⚠️ Could not read directory {}: {}", dir.display(), e);
            return;
        }
    };

    let dir_str = dir.to_string_lossy();
    let dir_matches = dir_str.contains(quarter) && dir_str.contains(stock);

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, stock, quarter, tables);
            continue;
        }

        if !dir_matches || path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(kind) = TableKind::from_file_name(file_name) else {
            continue;
        };

        let records = match read_csv_records(&path) {
            Ok(records) => Value::Array(records),
            Err(e) => Value::Array(vec![json!({
                "error": format!("Could not read file {}: {}", file_name, e)
            })]),
        };
        tables.insert(kind.suffix().to_string(), records);
    }
}

/// Reads one CSV into row objects keyed by the header record. Cells
/// parseable as finite numbers stay numbers; NaN, ±infinity and blank
/// cells become null; everything else is a string. Rows whose values
/// are all null are dropped; ragged rows are zipped against the headers
/// with missing cells null.
fn read_csv_records(path: &Path) -> Result<Vec<Value>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;

        let mut row = Map::new();
        let mut all_null = true;
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).map(cell_to_json).unwrap_or(Value::Null);
            if !value.is_null() {
                all_null = false;
            }
            row.insert(header.clone(), value);
        }

        if all_null {
            continue;
        }
        records.push(Value::Object(row));
    }

    Ok(records)
}

fn cell_to_json(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        // NaN and ±infinity have no JSON representation and become null
        return serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    Value::String(trimmed.to_string())
}
