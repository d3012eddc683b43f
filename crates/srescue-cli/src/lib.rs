//! CLI library components for spreadsheet-rescue.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
