//! Quality-control report: row accounting plus structured warnings.

use serde::{Deserialize, Serialize};

/// Data-quality warning categories. Contract violations use a category too so
/// the QC report stays self-describing on failure paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    AmbiguousDate,
    AmbiguousNumeric,
    EuDecimalComma,
    RowsDropped,
    DuplicateMappedColumn,
    MissingRequiredColumn,
    EmptyResult,
    EmptyInput,
}

/// A single aggregated warning. Warnings accumulate for the lifetime of one
/// run and are only ever serialized, never discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub category: WarningCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub count: Option<u64>,
}

impl Warning {
    pub fn new(category: WarningCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            column: None,
            count: None,
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

/// Quality-control report emitted alongside every run.
///
/// Invariant: `dropped_rows == rows_in - rows_out`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub dropped_rows: usize,
    #[serde(default)]
    pub missing_columns: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl QcReport {
    pub fn new(rows_in: usize) -> Self {
        Self {
            rows_in,
            ..Self::default()
        }
    }

    pub fn push_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Record the output row count and derive `dropped_rows`.
    pub fn set_rows_out(&mut self, rows_out: usize) {
        debug_assert!(rows_out <= self.rows_in);
        self.rows_out = rows_out;
        self.dropped_rows = self.rows_in.saturating_sub(rows_out);
    }

    pub fn has_missing_columns(&self) -> bool {
        !self.missing_columns.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_rows_follow_row_counts() {
        let mut qc = QcReport::new(10);
        qc.set_rows_out(7);
        assert_eq!(qc.dropped_rows, 3);
        assert_eq!(qc.rows_in - qc.rows_out, qc.dropped_rows);
    }

    #[test]
    fn warning_serializes_without_empty_fields() {
        let warning = Warning::new(WarningCategory::RowsDropped, "Dropped 2 rows")
            .with_count(2);
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["category"], "rows_dropped");
        assert_eq!(json["count"], 2);
        assert!(json.get("column").is_none());
    }

    #[test]
    fn report_round_trips() {
        let mut qc = QcReport::new(2);
        qc.set_rows_out(2);
        qc.push_warning(
            Warning::new(WarningCategory::EuDecimalComma, "Detected EU decimal commas")
                .with_column("revenue")
                .with_count(1),
        );
        let json = serde_json::to_string(&qc).unwrap();
        let round: QcReport = serde_json::from_str(&json).unwrap();
        assert_eq!(round, qc);
    }
}
