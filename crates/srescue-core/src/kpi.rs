//! Derived KPIs and aggregates over the validated row set.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use srescue_model::{CategoryTotal, CleanRow, KpiSet, WeeklyRow};

/// Top-level dashboard metrics. The margin is percent-points rounded to two
/// decimals: 25.53 means 25.53%.
pub fn compute_kpis(rows: &[CleanRow]) -> KpiSet {
    if rows.is_empty() {
        return KpiSet::default();
    }
    let mut total_revenue = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;
    let mut total_profit = Decimal::ZERO;
    let mut total_units = Decimal::ZERO;
    for row in rows {
        total_revenue += row.revenue;
        total_cost += row.cost;
        total_profit += row.profit;
        total_units += row.units;
    }
    let profit_margin_pct = if total_revenue.is_zero() {
        Decimal::ZERO
    } else {
        (total_profit / total_revenue * Decimal::ONE_HUNDRED).round_dp(2)
    };
    KpiSet {
        total_revenue,
        total_cost,
        total_profit,
        profit_margin_pct,
        total_units,
        top_product: top_by(rows, |row| &row.product, 1).pop().map(|t| t.name),
        top_region: top_by(rows, |row| &row.region, 1).pop().map(|t| t.name),
    }
}

/// Weekly revenue/cost/profit/units sums, chronological.
pub fn compute_weekly(rows: &[CleanRow]) -> Vec<WeeklyRow> {
    let mut weeks: BTreeMap<chrono::NaiveDate, WeeklyRow> = BTreeMap::new();
    for row in rows {
        let entry = weeks.entry(row.week).or_insert_with(|| WeeklyRow {
            week: row.week,
            revenue: Decimal::ZERO,
            cost: Decimal::ZERO,
            profit: Decimal::ZERO,
            units: Decimal::ZERO,
        });
        entry.revenue += row.revenue;
        entry.cost += row.cost;
        entry.profit += row.profit;
        entry.units += row.units;
    }
    weeks.into_values().collect()
}

/// Top products by revenue (revenue desc, name asc on ties).
pub fn compute_top_products(rows: &[CleanRow], n: usize) -> Vec<CategoryTotal> {
    top_by(rows, |row| &row.product, n)
}

/// Top regions by revenue (revenue desc, name asc on ties).
pub fn compute_top_regions(rows: &[CleanRow], n: usize) -> Vec<CategoryTotal> {
    top_by(rows, |row| &row.region, n)
}

fn top_by<'a, F>(rows: &'a [CleanRow], key: F, n: usize) -> Vec<CategoryTotal>
where
    F: Fn(&'a CleanRow) -> &'a str,
{
    let mut totals: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        let entry = totals.entry(key(row)).or_default();
        entry.0 += row.revenue;
        entry.1 += row.profit;
    }
    // BTreeMap yields names ascending; a stable sort on revenue keeps that
    // order for ties.
    let mut ranked: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(name, (revenue, profit))| CategoryTotal {
            name: name.to_string(),
            revenue,
            profit,
        })
        .collect();
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    use crate::coerce::week_start;

    fn row(date: (i32, u32, u32), product: &str, region: &str, revenue: &str, cost: &str) -> CleanRow {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        let revenue = Decimal::from_str(revenue).unwrap();
        let cost = Decimal::from_str(cost).unwrap();
        CleanRow {
            date,
            product: product.to_string(),
            region: region.to_string(),
            revenue,
            cost,
            units: Decimal::ONE,
            profit: revenue - cost,
            week: week_start(date),
        }
    }

    #[test]
    fn margin_is_percent_points_to_two_decimals() {
        let rows = vec![row((2024, 1, 1), "A", "North", "2000", "1489.40")];
        let kpis = compute_kpis(&rows);
        assert_eq!(kpis.total_profit, Decimal::from_str("510.60").unwrap());
        assert_eq!(kpis.profit_margin_pct, Decimal::from_str("25.53").unwrap());
    }

    #[test]
    fn empty_input_yields_zero_kpis() {
        let kpis = compute_kpis(&[]);
        assert_eq!(kpis.total_revenue, Decimal::ZERO);
        assert_eq!(kpis.profit_margin_pct, Decimal::ZERO);
        assert!(kpis.top_product.is_none());
        assert!(kpis.top_region.is_none());
    }

    #[test]
    fn weekly_groups_are_chronological() {
        let rows = vec![
            row((2024, 1, 10), "A", "North", "10", "5"),
            row((2024, 1, 3), "A", "North", "20", "5"),
            row((2024, 1, 2), "B", "South", "30", "5"),
        ];
        let weekly = compute_weekly(&rows);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].week, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(weekly[0].revenue, Decimal::from_str("50").unwrap());
        assert_eq!(weekly[1].week, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn rankings_sort_revenue_desc_then_name_asc() {
        let rows = vec![
            row((2024, 1, 1), "Gadget", "North", "100", "10"),
            row((2024, 1, 2), "Widget", "South", "100", "10"),
            row((2024, 1, 3), "Anvil", "East", "200", "10"),
        ];
        let top = compute_top_products(&rows, 10);
        let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Anvil", "Gadget", "Widget"]);
    }

    #[test]
    fn top_n_truncates() {
        let rows = vec![
            row((2024, 1, 1), "A", "N", "1", "0"),
            row((2024, 1, 1), "B", "N", "2", "0"),
            row((2024, 1, 1), "C", "N", "3", "0"),
        ];
        assert_eq!(compute_top_products(&rows, 2).len(), 2);
    }
}
