//! Result types shared between command execution and summary printing.

use std::path::PathBuf;

use srescue_model::{QcReport, RescueError};

/// Terminal state of one `run` or `validate` invocation.
pub struct RunOutcome {
    pub qc: QcReport,
    pub qc_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub exit_code: i32,
    /// User-facing error text for failed terminal states.
    pub error: Option<String>,
}

impl RunOutcome {
    /// A failure before any artifact could be written (bad flags, missing
    /// or unreadable input).
    pub fn rejected(error: &RescueError) -> Self {
        Self {
            qc: QcReport::default(),
            qc_path: None,
            manifest_path: None,
            report_path: None,
            exit_code: error.exit_code(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
