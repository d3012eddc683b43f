//! Required-field validation: a row is kept whole or dropped whole.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use srescue_model::CleanRow;

use crate::coerce::week_start;

/// A row after coercion, before validation. Empty text fields arrive as
/// `None`, like failed date/number coercions.
#[derive(Debug, Clone, Default)]
pub struct RowCandidate {
    pub date: Option<NaiveDate>,
    pub product: Option<String>,
    pub region: Option<String>,
    pub revenue: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub units: Option<Decimal>,
}

/// Build a `CleanRow` if every required field is present; otherwise the row
/// is dropped. Derived fields (`profit`, `week`) are computed here so a
/// `CleanRow` can never exist without them.
pub fn validate_row(candidate: RowCandidate) -> Option<CleanRow> {
    let date = candidate.date?;
    let product = candidate.product?;
    let region = candidate.region?;
    let revenue = candidate.revenue?;
    let cost = candidate.cost?;
    let units = candidate.units?;
    Some(CleanRow {
        date,
        product,
        region,
        revenue,
        cost,
        units,
        profit: revenue - cost,
        week: week_start(date),
    })
}

/// Trim a text field, treating the empty result as null.
pub fn coerce_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn full_candidate() -> RowCandidate {
        RowCandidate {
            date: NaiveDate::from_ymd_opt(2024, 1, 3),
            product: Some("Widget A".to_string()),
            region: Some("North".to_string()),
            revenue: Decimal::from_str("1200.50").ok(),
            cost: Decimal::from_str("200.25").ok(),
            units: Decimal::from_str("2").ok(),
        }
    }

    #[test]
    fn complete_candidate_becomes_a_clean_row() {
        let row = validate_row(full_candidate()).unwrap();
        assert_eq!(row.profit, Decimal::from_str("1000.25").unwrap());
        assert_eq!(row.week, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn any_missing_field_drops_the_row() {
        for wipe in 0..6 {
            let mut candidate = full_candidate();
            match wipe {
                0 => candidate.date = None,
                1 => candidate.product = None,
                2 => candidate.region = None,
                3 => candidate.revenue = None,
                4 => candidate.cost = None,
                _ => candidate.units = None,
            }
            assert!(validate_row(candidate).is_none(), "field {wipe}");
        }
    }

    #[test]
    fn text_fields_trim_to_null_when_empty() {
        assert_eq!(coerce_text("  North "), Some("North".to_string()));
        assert_eq!(coerce_text("   "), None);
        assert_eq!(coerce_text(""), None);
    }
}
