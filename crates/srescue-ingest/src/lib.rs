//! Table loading for spreadsheet-rescue: CSV and Excel inputs become a
//! `RawTable` of literal headers and text cells, with no implicit typing.

pub mod csv_table;
pub mod excel;
pub mod loader;

pub use csv_table::read_csv_table;
pub use excel::read_excel_table;
pub use loader::{load_table, sha256_file};
