//! The cleaning pipeline: normalize, map, schema-check, coerce, validate,
//! finalize warnings. The QC report is an explicit accumulator owned by the
//! run; no stage keeps state anywhere else.

use std::collections::BTreeMap;

use tracing::{debug, info};

use srescue_model::{
    CleanOptions, CleanTable, QcReport, RawTable, RescueError, Warning, WarningCategory,
};

use crate::coerce::{parse_date, parse_number};
use crate::headers::normalize_headers;
use crate::mapping::{ColumnMap, apply_column_map, missing_required};
use crate::validate::{RowCandidate, coerce_text, validate_row};

/// Numeric columns whose separator detections are tracked per column, in
/// reporting order.
const MONITORED_NUMERIC: [&str; 3] = ["revenue", "cost", "units"];

/// Result of one cleaning run. The QC report is always populated, also on
/// schema failures, so the caller can persist it on every terminal state.
#[derive(Debug)]
pub struct CleanOutcome {
    pub table: CleanTable,
    pub qc: QcReport,
    /// Schema-level contract violation, if the run failed before producing
    /// output. Coercion-level problems never end up here.
    pub failure: Option<RescueError>,
}

impl CleanOutcome {
    fn failed(mut qc: QcReport, failure: RescueError) -> Self {
        qc.set_rows_out(0);
        Self {
            table: CleanTable::default(),
            qc,
            failure: Some(failure),
        }
    }
}

#[derive(Default)]
struct NumericCounters {
    eu_decimal_comma: u64,
    ambiguous: u64,
}

/// Clean a raw table under the given mapping and options.
///
/// Deterministic: identical input and configuration always produce identical
/// rows, KPIs downstream, and warning sequences.
pub fn clean_table(raw: &RawTable, map: &ColumnMap, options: &CleanOptions) -> CleanOutcome {
    let mut qc = QcReport::new(raw.row_count());

    let normalized = match normalize_headers(&raw.headers) {
        Ok(headers) => headers,
        Err(error) => {
            qc.push_warning(Warning::new(
                WarningCategory::DuplicateMappedColumn,
                error.to_string(),
            ));
            return CleanOutcome::failed(qc, error);
        }
    };
    debug!(columns = normalized.len(), "headers normalized");

    let resolved = match apply_column_map(&normalized, map, &mut qc) {
        Ok(resolved) => resolved,
        Err(error) => return CleanOutcome::failed(qc, error),
    };

    let missing = missing_required(&resolved);
    if !missing.is_empty() {
        qc.missing_columns = missing.clone();
        qc.push_warning(Warning::new(
            WarningCategory::MissingRequiredColumn,
            format!("Missing required columns: {}", missing.join(", ")),
        ));
        return CleanOutcome::failed(qc, RescueError::MissingColumns { columns: missing });
    }

    // Column positions are fixed after the schema check.
    let index: BTreeMap<&str, usize> = resolved
        .iter()
        .enumerate()
        .map(|(idx, header)| (header.as_str(), idx))
        .collect();
    let date_idx = index["date"];
    let product_idx = index["product"];
    let region_idx = index["region"];
    let numeric_idx: Vec<usize> = MONITORED_NUMERIC.iter().map(|name| index[name]).collect();

    let mut ambiguous_dates: u64 = 0;
    let mut numeric_counters: BTreeMap<&str, NumericCounters> = BTreeMap::new();
    let mut clean_rows = Vec::with_capacity(raw.row_count());
    let mut dropped: u64 = 0;

    for row in &raw.rows {
        let cell = |idx: usize| row.get(idx).map_or("", String::as_str);

        let date_parse = parse_date(cell(date_idx), options.date_mode);
        if date_parse.ambiguous {
            ambiguous_dates += 1;
        }

        let mut candidate = RowCandidate {
            date: date_parse.date,
            product: coerce_text(cell(product_idx)),
            region: coerce_text(cell(region_idx)),
            ..RowCandidate::default()
        };
        for (name, idx) in MONITORED_NUMERIC.iter().zip(&numeric_idx) {
            let parse = parse_number(cell(*idx), options.number_locale);
            if parse.eu_decimal_comma || parse.ambiguous {
                let counters = numeric_counters.entry(*name).or_default();
                if parse.eu_decimal_comma {
                    counters.eu_decimal_comma += 1;
                }
                if parse.ambiguous {
                    counters.ambiguous += 1;
                }
            }
            match *name {
                "revenue" => candidate.revenue = parse.value,
                "cost" => candidate.cost = parse.value,
                _ => candidate.units = parse.value,
            }
        }

        match validate_row(candidate) {
            Some(clean) => clean_rows.push(clean),
            None => dropped += 1,
        }
    }

    // Stable sort: rows sharing a date keep their input order.
    clean_rows.sort_by_key(|row| row.date);

    if ambiguous_dates > 0 {
        qc.push_warning(
            Warning::new(
                WarningCategory::AmbiguousDate,
                format!(
                    "Found {ambiguous_dates} ambiguous day/month dates; interpreted as {}",
                    options.date_mode.reading()
                ),
            )
            .with_count(ambiguous_dates),
        );
    }
    for name in MONITORED_NUMERIC {
        let Some(counters) = numeric_counters.get(name) else {
            continue;
        };
        if counters.eu_decimal_comma > 0 {
            let n = counters.eu_decimal_comma;
            qc.push_warning(
                Warning::new(
                    WarningCategory::EuDecimalComma,
                    format!(
                        "Detected EU decimal commas in {name}: {n} {}",
                        plural(n, "value")
                    ),
                )
                .with_column(name)
                .with_count(n),
            );
        }
        if counters.ambiguous > 0 {
            let n = counters.ambiguous;
            qc.push_warning(
                Warning::new(
                    WarningCategory::AmbiguousNumeric,
                    format!(
                        "Found {n} ambiguous numeric {} in {name}; used thousands-separator reading",
                        plural(n, "value")
                    ),
                )
                .with_column(name)
                .with_count(n),
            );
        }
    }
    if dropped > 0 {
        qc.push_warning(
            Warning::new(
                WarningCategory::RowsDropped,
                format!("Dropped {dropped} rows with invalid/missing values"),
            )
            .with_count(dropped),
        );
    }
    qc.set_rows_out(clean_rows.len());
    if clean_rows.is_empty() {
        qc.push_warning(Warning::new(
            WarningCategory::EmptyResult,
            "Cleaned dataset is empty - no valid rows remain",
        ));
    }

    info!(
        rows_in = qc.rows_in,
        rows_out = qc.rows_out,
        dropped_rows = qc.dropped_rows,
        warnings = qc.warning_count(),
        "cleaning complete"
    );

    CleanOutcome {
        table: CleanTable { rows: clean_rows },
        qc,
        failure: None,
    }
}

fn plural(n: u64, noun: &str) -> String {
    if n == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
