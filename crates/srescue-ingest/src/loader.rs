//! Format dispatch and input fingerprinting.

use std::io::Read;
use std::path::Path;

use sha2::Digest;
use tracing::debug;

use srescue_model::{RawTable, RescueError, Result};

use crate::csv_table::read_csv_table;
use crate::excel::read_excel_table;

/// Load a CSV or Excel file into a `RawTable`.
///
/// Unreadable, missing, or unsupported inputs fail as contract violations
/// before any normalization begins.
pub fn load_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(RescueError::InputNotFound(path.to_path_buf()));
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let table = match extension.as_str() {
        "csv" => read_csv_table(path)?,
        "xlsx" | "xlsm" | "xltx" | "xltm" | "xls" => read_excel_table(path)?,
        _ => {
            return Err(RescueError::UnsupportedFormat {
                extension: format!(".{extension}"),
            });
        }
    };
    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded input table"
    );
    Ok(table)
}

/// Hex SHA-256 digest of a file's bytes, for the run manifest fingerprint.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = sha2::Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "srescue-loader-test-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_input_is_a_contract_violation() {
        let error = load_table(Path::new("/nonexistent/input.csv")).unwrap_err();
        assert!(error.is_contract_violation());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = temp_dir().join("data.parquet");
        std::fs::write(&path, b"x").unwrap();
        let error = load_table(&path).unwrap_err();
        assert!(matches!(error, RescueError::UnsupportedFormat { .. }));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn sha256_is_stable_for_identical_bytes() {
        let dir = temp_dir();
        let a = dir.join("a.csv");
        let b = dir.join("b.csv");
        std::fs::write(&a, b"date,revenue\n").unwrap();
        std::fs::write(&b, b"date,revenue\n").unwrap();
        assert_eq!(sha256_file(&a).unwrap(), sha256_file(&b).unwrap());
    }
}
