//! Derived KPI aggregates computed from the cleaned dataset.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Top-level dashboard metrics. Empty input yields zero totals and no
/// top product/region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KpiSet {
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    /// Percent-points: `25.53` means 25.53%, not 0.2553.
    pub profit_margin_pct: Decimal,
    pub total_units: Decimal,
    pub top_product: Option<String>,
    pub top_region: Option<String>,
}

/// One week of aggregated figures. `week` is the Monday starting the period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRow {
    pub week: NaiveDate,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    pub units: Decimal,
}

/// Revenue/profit totals for one product or region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
}
