use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::{info, info_span, warn};

use srescue_core::{
    clean_table, compute_kpis, compute_top_products, compute_top_regions, compute_weekly,
    load_profile, parse_map_entries, ColumnMap,
};
use srescue_ingest::{load_table, sha256_file};
use srescue_model::{
    CleanOptions, QcReport, RescueError, RunManifest, Warning, WarningCategory,
};
use srescue_report::{write_manifest, write_qc_report, write_report, ReportInputs};

use crate::cli::CleanArgs;
use crate::types::RunOutcome;

pub fn run(args: &CleanArgs) -> Result<RunOutcome> {
    execute(args, true)
}

pub fn validate(args: &CleanArgs) -> Result<RunOutcome> {
    execute(args, false)
}

fn execute(args: &CleanArgs, with_report: bool) -> Result<RunOutcome> {
    let span = info_span!("pipeline", input = %args.input.display());
    let _guard = span.enter();
    let started = Instant::now();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    // Bad flags fail before anything touches the output directory.
    let map = match build_column_map(args) {
        Ok(map) => map,
        Err(error) => return Ok(RunOutcome::rejected(&error)),
    };

    fs::create_dir_all(&args.out_dir).with_context(|| {
        format!("create output directory {}", args.out_dir.display())
    })?;

    let raw = match load_table(&args.input) {
        Ok(raw) => raw,
        Err(error) => return Ok(RunOutcome::rejected(&error)),
    };
    info!(
        rows = raw.row_count(),
        columns = raw.column_count(),
        "loaded input"
    );

    // From here on every terminal state persists QC plus manifest.
    let mut manifest = RunManifest::provisional(
        env!("CARGO_PKG_VERSION"),
        display_path(&args.input),
        display_path(&args.out_dir),
        &created_at,
    );
    manifest.sha256 = match sha256_file(&args.input) {
        Ok(digest) => digest,
        Err(error) => {
            warn!(input = %args.input.display(), %error, "could not fingerprint input");
            String::new()
        }
    };

    if raw.is_empty() {
        let mut qc = QcReport::new(0);
        qc.set_rows_out(0);
        qc.push_warning(Warning::new(
            WarningCategory::EmptyInput,
            "Input file has 0 rows.",
        ));
        return finalize(&args.out_dir, qc, manifest, None, Some(RescueError::EmptyInput));
    }

    let options = CleanOptions {
        date_mode: args.date_mode(),
        number_locale: args.number_locale(),
        ..CleanOptions::default()
    };
    let outcome = clean_table(&raw, &map, &options);
    if let Some(failure) = outcome.failure {
        return finalize(&args.out_dir, outcome.qc, manifest, None, Some(failure));
    }

    let mut report_path = None;
    if with_report {
        let rows = &outcome.table.rows;
        let kpis = compute_kpis(rows);
        let weekly = compute_weekly(rows);
        let top_products = compute_top_products(rows, options.top_n);
        let top_regions = compute_top_regions(rows, options.top_n);
        let generated_at = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        let inputs = ReportInputs {
            rows,
            kpis: &kpis,
            weekly: &weekly,
            top_products: &top_products,
            top_regions: &top_regions,
            qc: &outcome.qc,
            generated_at_utc: &generated_at,
        };
        match write_report(&args.out_dir, &inputs) {
            Ok(path) => report_path = Some(path),
            Err(error) => {
                return finalize(&args.out_dir, outcome.qc, manifest, None, Some(error));
            }
        }
    }

    info!(
        rows_out = outcome.qc.rows_out,
        duration_ms = started.elapsed().as_millis(),
        "pipeline complete"
    );
    finalize(&args.out_dir, outcome.qc, manifest, report_path, None)
}

/// Profile mappings come first so explicit `--map` flags override them.
fn build_column_map(args: &CleanArgs) -> srescue_model::Result<ColumnMap> {
    let mut raw = match &args.profile {
        Some(path) => load_profile(path)?,
        None => Vec::new(),
    };
    raw.extend(args.map.iter().cloned());
    parse_map_entries(&raw)
}

/// Write QC report and manifest, then assemble the terminal outcome.
fn finalize(
    out_dir: &Path,
    qc: QcReport,
    mut manifest: RunManifest,
    report_path: Option<std::path::PathBuf>,
    failure: Option<RescueError>,
) -> Result<RunOutcome> {
    let exit_code = failure.as_ref().map_or(0, RescueError::exit_code);
    if failure.is_some() {
        manifest.finalize_failure(exit_code, qc.rows_in, qc.rows_out);
    } else {
        manifest.finalize_success(qc.rows_in, qc.rows_out);
    }
    let qc_path = write_qc_report(out_dir, &qc).context("write qc report")?;
    let manifest_path = write_manifest(out_dir, &manifest).context("write run manifest")?;
    Ok(RunOutcome {
        qc,
        qc_path: Some(qc_path),
        manifest_path: Some(manifest_path),
        report_path,
        exit_code,
        error: failure.map(|error| error.to_string()),
    })
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
