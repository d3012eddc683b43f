//! Output artifact generation.
//!
//! This crate writes the three artifacts every run produces:
//!
//! - **Final_Report.xlsx**: Formatted workbook with Dashboard, Weekly,
//!   Top_Products, Top_Regions, and Clean_Data sheets
//! - **qc_report.json**: Row accounting and data-quality warnings
//! - **run_manifest.json**: Provenance record for the run

mod excel;
mod json;

pub use excel::{escape_formula, write_report, ReportInputs, REPORT_FILE_NAME};
pub use json::{write_json, write_manifest, write_qc_report};
