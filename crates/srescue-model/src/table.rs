//! Raw and cleaned tabular data.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The six fields every output row must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 6] = ["date", "product", "region", "revenue", "cost", "units"];

/// A loaded table before any normalization: literal header strings and every
/// cell as text. One `RawTable` per source file, in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// True when the table has no data rows (a header alone is still empty).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// A fully coerced and validated row. Construction goes through the row
/// validator; every field is guaranteed non-null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRow {
    pub date: NaiveDate,
    pub product: String,
    pub region: String,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub units: Decimal,
    /// `revenue - cost`, exact.
    pub profit: Decimal,
    /// Monday starting the Sunday-ending week containing `date`.
    pub week: NaiveDate,
}

/// The cleaned dataset, sorted by date.
#[derive(Debug, Clone, Default)]
pub struct CleanTable {
    pub rows: Vec<CleanRow>,
}

impl CleanTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
