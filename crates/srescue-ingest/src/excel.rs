//! Excel loading via calamine: first worksheet, every cell rendered as text.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use srescue_model::{RawTable, RescueError, Result};

/// Format a float the way a spreadsheet displays it: no trailing zeros,
/// no dangling decimal point.
fn format_numeric(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Render one cell as text. Typed Excel values (floats, dates) are rendered
/// deterministically; error cells become empty and fall to the row validator.
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) => format_numeric(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(excel_dt) => match excel_dt.as_datetime() {
            Some(dt) if dt.time() == chrono::NaiveTime::MIN => {
                dt.date().format("%Y-%m-%d").to_string()
            }
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_numeric(excel_dt.as_f64()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
    }
}

fn unreadable(path: &Path, reason: impl ToString) -> RescueError {
    RescueError::Unreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Read the first worksheet of an Excel file into a `RawTable`.
pub fn read_excel_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|error| unreadable(path, error))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable(path, "workbook has no worksheets"))?
        .map_err(|error| unreadable(path, error))?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in range.rows() {
        let cells: Vec<String> = record.iter().map(cell_to_text).collect();
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
