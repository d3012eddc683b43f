//! The deterministic cleaning and type-coercion pipeline: header
//! normalization, column remapping, locale-aware date and number coercion,
//! required-field validation, and derived-KPI computation. No transformation
//! may silently corrupt a value without a traceable warning.

pub mod coerce;
pub mod headers;
pub mod kpi;
pub mod mapping;
pub mod pipeline;
pub mod validate;

pub use coerce::{DateParse, NumberParse, parse_date, parse_number, week_start};
pub use headers::{normalize_header, normalize_headers};
pub use kpi::{compute_kpis, compute_top_products, compute_top_regions, compute_weekly};
pub use mapping::{ColumnMap, apply_column_map, load_profile, missing_required, parse_map_entries};
pub use pipeline::{CleanOutcome, clean_table};
pub use validate::{RowCandidate, coerce_text, validate_row};
