//! JSON artifact persistence: QC report and run manifest.
//!
//! Writes are atomic (tmp file + rename) and deterministic: struct field
//! order, pretty-printed, trailing newline.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use srescue_model::{QcReport, RescueError, Result, RunManifest};

/// Serialize `data` as pretty JSON to `path`, atomically.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut payload = serde_json::to_string_pretty(data)
        .map_err(|error| RescueError::Message(format!("serialize json: {error}")))?;
    payload.push('\n');

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RescueError::Message(format!("invalid artifact path: {}", path.display())))?;
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    std::fs::write(&tmp_path, payload)?;
    std::fs::rename(&tmp_path, path)?;
    debug!(path = %path.display(), "wrote json artifact");
    Ok(path.to_path_buf())
}

/// Write `qc_report.json` into `out_dir` and return the path.
pub fn write_qc_report(out_dir: &Path, qc: &QcReport) -> Result<PathBuf> {
    write_json(&out_dir.join("qc_report.json"), qc)
}

/// Write `run_manifest.json` into `out_dir` and return the path.
pub fn write_manifest(out_dir: &Path, manifest: &RunManifest) -> Result<PathBuf> {
    write_json(&out_dir.join("run_manifest.json"), manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use srescue_model::{Warning, WarningCategory};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "srescue-json-test-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn qc_report_round_trips_through_disk() {
        let dir = temp_dir();
        let mut qc = QcReport::new(3);
        qc.set_rows_out(2);
        qc.push_warning(
            Warning::new(WarningCategory::RowsDropped, "Dropped 1 rows with invalid/missing values")
                .with_count(1),
        );
        let path = write_qc_report(&dir, &qc).unwrap();
        assert_eq!(path.file_name().unwrap(), "qc_report.json");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        let round: QcReport = serde_json::from_str(&text).unwrap();
        assert_eq!(round, qc);
        // No tmp file left behind.
        assert!(!dir.join("qc_report.json.tmp").exists());
    }

    #[test]
    fn identical_reports_serialize_to_identical_bytes() {
        let dir = temp_dir();
        let mut qc = QcReport::new(2);
        qc.set_rows_out(2);
        let first = std::fs::read(write_json(&dir.join("a.json"), &qc).unwrap()).unwrap();
        let second = std::fs::read(write_json(&dir.join("b.json"), &qc).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
