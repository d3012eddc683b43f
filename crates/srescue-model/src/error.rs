use std::path::PathBuf;

use thiserror::Error;

/// Exit code for input/contract violations.
pub const EXIT_CONTRACT: i32 = 2;
/// Exit code for unexpected internal failures.
pub const EXIT_UNEXPECTED: i32 = 1;

#[derive(Debug, Error)]
pub enum RescueError {
    #[error("invalid --map value: '{0}' (expected target=source)")]
    InvalidMapEntry(String),
    #[error("--map entries must have non-empty target and source (target=source)")]
    EmptyMapEntry,
    #[error("profile not found: {} (expected lines like revenue=Sales)", .0.display())]
    ProfileNotFound(PathBuf),
    #[error("duplicate column '{name}' after header normalization")]
    DuplicateHeader { name: String },
    #[error("duplicate mapped column target '{target}' from sources: {}", sources.join(", "))]
    DuplicateTarget {
        target: String,
        sources: Vec<String>,
    },
    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[error("input file has 0 rows")]
    EmptyInput,
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("unsupported file type: '{extension}'. Use .csv, .xlsx, or .xls")]
    UnsupportedFormat { extension: String },
    #[error("could not read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

impl RescueError {
    /// True for the contract-violation class: configuration and schema-level
    /// failures that are the operator's to fix, never the pipeline's.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMapEntry(_)
                | Self::EmptyMapEntry
                | Self::ProfileNotFound(_)
                | Self::DuplicateHeader { .. }
                | Self::DuplicateTarget { .. }
                | Self::MissingColumns { .. }
                | Self::EmptyInput
                | Self::InputNotFound(_)
                | Self::UnsupportedFormat { .. }
                | Self::Unreadable { .. }
        )
    }

    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        if self.is_contract_violation() {
            EXIT_CONTRACT
        } else {
            EXIT_UNEXPECTED
        }
    }
}

pub type Result<T> = std::result::Result<T, RescueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violations_exit_2() {
        let error = RescueError::MissingColumns {
            columns: vec!["date".to_string(), "units".to_string()],
        };
        assert!(error.is_contract_violation());
        assert_eq!(error.exit_code(), EXIT_CONTRACT);
        assert_eq!(error.to_string(), "missing required columns: date, units");
    }

    #[test]
    fn duplicate_target_names_every_source() {
        let error = RescueError::DuplicateTarget {
            target: "revenue".to_string(),
            sources: vec!["revenue".to_string(), "sales".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "duplicate mapped column target 'revenue' from sources: revenue, sales"
        );
    }

    #[test]
    fn internal_failures_exit_1() {
        let error = RescueError::Message("boom".to_string());
        assert!(!error.is_contract_violation());
        assert_eq!(error.exit_code(), EXIT_UNEXPECTED);
    }
}
