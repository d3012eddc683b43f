//! Numeric coercion under an explicit separator-locale policy.
//!
//! The `auto` heuristic is a fixed deterministic policy, not a smart
//! detector: when a token carries both separators the one appearing last is
//! the decimal separator; a single-comma token with a one- or two-digit
//! fraction is a confident EU decimal; a single comma before exactly three
//! digits is ambiguous and falls back to the thousands reading. Any change
//! here silently changes financial totals downstream, so the worked examples
//! in the tests are normative.

use std::str::FromStr;

use rust_decimal::Decimal;

use srescue_model::NumberLocale;

/// Outcome of coercing one raw numeric token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberParse {
    pub value: Option<Decimal>,
    /// `,` was read as the decimal separator by the auto heuristic.
    pub eu_decimal_comma: bool,
    /// The token was plausible under more than one reading; the thousands
    /// reading was used.
    pub ambiguous: bool,
}

/// Strip currency symbols, spacing, and accounting dashes. A token that is
/// nothing but a dash placeholder becomes empty and coerces to null.
fn strip_decoration(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | '\u{20ac}' | '\u{a3}' | '\u{2014}' | '\u{2013}'))
        .filter(|ch| !ch.is_whitespace())
        .collect()
}

fn parse_decimal(cleaned: &str) -> Option<Decimal> {
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

/// Parse a raw numeric token under the given locale policy.
///
/// Flags are only raised when a value is actually produced, and only by the
/// `auto` heuristic: under an explicit locale the separator reading is
/// configuration, not detection.
pub fn parse_number(raw: &str, locale: NumberLocale) -> NumberParse {
    let cleaned = strip_decoration(raw);
    match locale {
        NumberLocale::Us => NumberParse {
            value: parse_decimal(&cleaned.replace(',', "")),
            ..NumberParse::default()
        },
        NumberLocale::Eu => NumberParse {
            value: parse_decimal(&cleaned.replace('.', "").replace(',', ".")),
            ..NumberParse::default()
        },
        NumberLocale::Auto => parse_auto(&cleaned),
    }
}

fn parse_auto(cleaned: &str) -> NumberParse {
    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    let (candidate, eu, ambiguous) = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => {
            // Both separators: the one appearing last is the decimal.
            if comma > dot {
                (cleaned.replace('.', "").replace(',', "."), true, false)
            } else {
                (cleaned.replace(',', ""), false, false)
            }
        }
        (Some(_), None) => parse_comma_only(cleaned),
        (None, Some(_)) => {
            if cleaned.matches('.').count() > 1 {
                // 1.234.567 can only be EU grouping.
                (cleaned.replace('.', ""), false, false)
            } else {
                (cleaned.to_string(), false, false)
            }
        }
        (None, None) => (cleaned.to_string(), false, false),
    };

    match parse_decimal(&candidate) {
        Some(value) => NumberParse {
            value: Some(value),
            eu_decimal_comma: eu,
            ambiguous,
        },
        None => NumberParse::default(),
    }
}

/// Comma-only policy: a single comma with a 1- or 2-digit fraction is a
/// confident EU decimal; a single comma before exactly 3 digits could be
/// grouping or a decimal, so it is ambiguous and reads as thousands.
fn parse_comma_only(cleaned: &str) -> (String, bool, bool) {
    if cleaned.matches(',').count() > 1 {
        return (cleaned.replace(',', ""), false, false);
    }
    let fraction_len = cleaned
        .rsplit(',')
        .next()
        .map_or(0, |fraction| fraction.len());
    if fraction_len == 3 {
        (cleaned.replace(',', ""), false, true)
    } else {
        (cleaned.replace(',', "."), true, false)
    }
}
