//! Configuration options for the cleaning pipeline.

use serde::{Deserialize, Serialize};

/// How an ambiguous day/month date token is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    /// `01/02/2024` reads as January 2nd (MM/DD).
    #[default]
    MonthFirst,
    /// `01/02/2024` reads as February 1st (DD/MM).
    DayFirst,
}

impl DateMode {
    /// Human-readable reading order, used in aggregated warnings.
    pub fn reading(self) -> &'static str {
        match self {
            Self::MonthFirst => "month/day (MM/DD)",
            Self::DayFirst => "day/month (DD/MM)",
        }
    }
}

/// Separator convention for numeric tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberLocale {
    /// Per-token heuristic: last separator wins, comma-decimal detection.
    #[default]
    Auto,
    /// Comma groups thousands, dot is the decimal separator.
    Us,
    /// Dot groups thousands, comma is the decimal separator.
    Eu,
}

/// Options controlling one cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Ambiguous date resolution policy.
    pub date_mode: DateMode,
    /// Numeric separator policy.
    pub number_locale: NumberLocale,
    /// Ranking depth for top products/regions.
    pub top_n: usize,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            date_mode: DateMode::default(),
            number_locale: NumberLocale::default(),
            top_n: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_contract() {
        let options = CleanOptions::default();
        assert_eq!(options.date_mode, DateMode::MonthFirst);
        assert_eq!(options.number_locale, NumberLocale::Auto);
        assert_eq!(options.top_n, 10);
    }

    #[test]
    fn modes_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&NumberLocale::Eu).unwrap(),
            "\"eu\""
        );
        assert_eq!(
            serde_json::to_string(&DateMode::DayFirst).unwrap(),
            "\"dayfirst\""
        );
    }
}
