//! CSV loading: literal headers, all cells as text.

use std::path::Path;

use csv::ReaderBuilder;

use srescue_model::{RawTable, RescueError, Result};

/// Decode CSV bytes as UTF-8 (with or without BOM), falling back to
/// Windows-1252 for legacy exports.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn unreadable(path: &Path, reason: impl ToString) -> RescueError {
    RescueError::Unreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Read a CSV file into a `RawTable`. The first non-empty record supplies the
/// literal header strings; short records are padded with empty cells and
/// fully-empty records are skipped.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|error| unreadable(path, error))?;
    let text = decode_text(&bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| unreadable(path, error))?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        match &headers {
            None => headers = Some(cells),
            Some(header_row) => {
                let mut row = Vec::with_capacity(header_row.len());
                for idx in 0..header_row.len() {
                    row.push(cells.get(idx).cloned().unwrap_or_default());
                }
                rows.push(row);
            }
        }
    }

    Ok(RawTable::new(headers.unwrap_or_default(), rows))
}
