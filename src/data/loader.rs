use std::io::Read;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::{DataError, Result};
use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a record set from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "name": "a", "type": "x" }, ...]`
/// * `.csv`  – header row plus rows; cell types are guessed where the cell
///   text survives it
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(DataError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)?;
    parse_json_records(&text)
}

/// Parse a JSON array of flat objects. Key order of each object is kept.
///
/// Only the shape is checked (array of objects); field sets and value types
/// are taken as they come.
pub fn parse_json_records(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root.as_array().ok_or(DataError::NotAnArray)?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(row, value)| -> Result<Record> {
            let obj = value.as_object().ok_or(DataError::RowNotObject { row })?;
            Ok(obj.iter().map(|(k, v)| (k.clone(), CellValue::from(v))).collect())
        })
        .collect::<Result<Vec<Record>>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)?;
    parse_csv_records(file)
}

/// Parse standard (RFC 4180) CSV with a header row into records.
pub fn parse_csv_records<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.clone(), guess_cell_type(cell)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

/// Type a CSV cell as integer, float or bool only when the typed value
/// prints back as the exact cell text. `00123`, `1e3`, `+5` and the empty
/// cell stay strings.
fn guess_cell_type(s: &str) -> CellValue {
    let guess = if let Ok(i) = s.parse::<i64>() {
        CellValue::Integer(i)
    } else if let Ok(f) = s.parse::<f64>() {
        CellValue::Float(f)
    } else if s == "true" || s == "false" {
        CellValue::Bool(s == "true")
    } else {
        return CellValue::String(s.to_string());
    };

    if guess.to_string() == s {
        guess
    } else {
        CellValue::String(s.to_string())
    }
}
