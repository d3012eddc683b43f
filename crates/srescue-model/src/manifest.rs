//! Audit-trail manifest for a single pipeline run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
}

/// Reproducibility record written next to every QC report. Created with
/// provisional values when the run starts and finalized once the terminal
/// state is known, including on failure paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    pub tool: String,
    pub version: String,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_code: Option<i32>,
    pub input_path: String,
    pub output_dir: String,
    pub created_at_utc: String,
    pub rows_in: usize,
    pub rows_out: usize,
    /// SHA-256 of the input file bytes.
    pub sha256: String,
}

impl RunManifest {
    /// Provisional manifest at run start. Status stays `Failed` until the
    /// run reaches a successful terminal state.
    pub fn provisional(
        version: impl Into<String>,
        input_path: impl Into<String>,
        output_dir: impl Into<String>,
        created_at_utc: impl Into<String>,
    ) -> Self {
        Self {
            tool: "spreadsheet-rescue".to_string(),
            version: version.into(),
            status: RunStatus::Failed,
            error_code: None,
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            created_at_utc: created_at_utc.into(),
            rows_in: 0,
            rows_out: 0,
            sha256: String::new(),
        }
    }

    pub fn finalize_success(&mut self, rows_in: usize, rows_out: usize) {
        self.status = RunStatus::Success;
        self.error_code = None;
        self.rows_in = rows_in;
        self.rows_out = rows_out;
    }

    pub fn finalize_failure(&mut self, exit_code: i32, rows_in: usize, rows_out: usize) {
        self.status = RunStatus::Failed;
        self.error_code = Some(exit_code);
        self.rows_in = rows_in;
        self.rows_out = rows_out;
    }
}
