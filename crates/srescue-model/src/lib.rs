//! Shared data model for spreadsheet-rescue: errors, options, tables, the QC
//! report, the run manifest, and KPI aggregates. No I/O lives here.

pub mod error;
pub mod kpi;
pub mod manifest;
pub mod options;
pub mod qc;
pub mod table;

pub use error::{EXIT_CONTRACT, EXIT_UNEXPECTED, RescueError, Result};
pub use kpi::{CategoryTotal, KpiSet, WeeklyRow};
pub use manifest::{RunManifest, RunStatus};
pub use options::{CleanOptions, DateMode, NumberLocale};
pub use qc::{QcReport, Warning, WarningCategory};
pub use table::{CleanRow, CleanTable, RawTable, REQUIRED_COLUMNS};
