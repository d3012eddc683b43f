//! Date coercion under an explicit day/month ambiguity policy.
//!
//! A token that reads plausibly as either MM/DD or DD/MM (both leading
//! components <= 12, and unequal) is *ambiguous*: it still parses
//! deterministically according to the configured mode, but the caller is told
//! so and aggregates a run-level warning. Unparseable tokens coerce to null,
//! never to a synthetic date.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use srescue_model::DateMode;

/// Outcome of coercing one raw date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateParse {
    pub date: Option<NaiveDate>,
    pub ambiguous: bool,
}

impl DateParse {
    fn none() -> Self {
        Self::default()
    }

    fn unambiguous(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ambiguous: false,
        }
    }
}

/// Date-only formats tried after the numeric fast path.
const DATE_FORMATS: [&str; 8] = [
    "%Y%m%d",    // 20240115
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
];

/// Datetime formats whose date part is taken (Excel exports carry times).
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a raw date token under the given ambiguity mode.
pub fn parse_date(raw: &str, mode: DateMode) -> DateParse {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DateParse::none();
    }

    if let Some(parts) = split_numeric_triple(trimmed) {
        return parse_numeric_triple(parts, mode);
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return DateParse::unambiguous(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return DateParse::unambiguous(datetime.date());
        }
    }

    DateParse::none()
}

/// Split `a<sep>b<sep>c` where every component is pure digits and the
/// separator is `/`, `-`, or `.`.
fn split_numeric_triple(token: &str) -> Option<[&str; 3]> {
    let separator = ['/', '-', '.']
        .into_iter()
        .find(|sep| token.contains(*sep))?;
    let mut parts = token.split(separator);
    let a = parts.next()?;
    let b = parts.next()?;
    let c = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let all_digits = [a, b, c]
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit()));
    all_digits.then_some([a, b, c])
}

fn parse_numeric_triple(parts: [&str; 3], mode: DateMode) -> DateParse {
    let [first, second, third] = parts;

    // Year-first is never ambiguous: 2024-01-03.
    if first.len() == 4 {
        let (Ok(year), Ok(month), Ok(day)) =
            (first.parse::<i32>(), second.parse::<u32>(), third.parse::<u32>())
        else {
            return DateParse::none();
        };
        return match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => DateParse::unambiguous(date),
            None => DateParse::none(),
        };
    }

    if third.len() != 4 {
        // Two-digit years are not recognized; guessing the century would be
        // silent corruption.
        return DateParse::none();
    }
    let (Ok(a), Ok(b), Ok(year)) =
        (first.parse::<u32>(), second.parse::<u32>(), third.parse::<i32>())
    else {
        return DateParse::none();
    };

    let (month, day, ambiguous) = match (a <= 12, b <= 12) {
        (true, true) => {
            let ambiguous = a != b;
            match mode {
                DateMode::MonthFirst => (a, b, ambiguous),
                DateMode::DayFirst => (b, a, ambiguous),
            }
        }
        // Only one reading is plausible; the mode does not apply.
        (true, false) => (a, b, false),
        (false, true) => (b, a, false),
        (false, false) => return DateParse::none(),
    };

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => DateParse {
            date: Some(date),
            ambiguous,
        },
        None => DateParse::none(),
    }
}

/// The Monday that begins the Sunday-ending weekly period containing `date`.
/// Pure and timezone-independent.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(offset)
}
