use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use srescue_model::REQUIRED_COLUMNS;

use crate::types::RunOutcome;

pub fn print_run_summary(outcome: &RunOutcome) {
    if outcome.is_success() {
        println!(
            "Done - {} clean rows retained ({} dropped)",
            outcome.qc.rows_out, outcome.qc.dropped_rows
        );
        for warning in &outcome.qc.warnings {
            println!("  ! {}", warning.message);
        }
    }
    print_artifacts(outcome);
    print_failure(outcome);
}

pub fn print_validation_summary(outcome: &RunOutcome) {
    let qc = &outcome.qc;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Result")]);
    apply_table_style(&mut table);

    table.add_row(vec![Cell::new("Rows in"), Cell::new(qc.rows_in)]);
    table.add_row(vec![Cell::new("Rows out"), Cell::new(qc.rows_out)]);
    table.add_row(vec![Cell::new("Dropped"), Cell::new(qc.dropped_rows)]);
    if qc.has_missing_columns() {
        table.add_row(vec![
            Cell::new("Missing columns"),
            Cell::new(qc.missing_columns.join(", ")).fg(Color::Red),
        ]);
    } else {
        table.add_row(vec![
            Cell::new("Missing columns"),
            Cell::new("none").fg(Color::Green),
        ]);
    }
    for warning in &qc.warnings {
        table.add_row(vec![
            Cell::new("Warning"),
            Cell::new(&warning.message).fg(Color::Yellow),
        ]);
    }
    let status = if outcome.is_success() {
        Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    };
    table.add_row(vec![Cell::new("Status"), status]);
    println!("{table}");

    print_artifacts(outcome);
    print_failure(outcome);
}

fn print_artifacts(outcome: &RunOutcome) {
    if let Some(path) = &outcome.report_path {
        println!("Report:   {}", path.display());
    }
    if let Some(path) = &outcome.qc_path {
        println!("QC:       {}", path.display());
    }
    if let Some(path) = &outcome.manifest_path {
        println!("Manifest: {}", path.display());
    }
}

fn print_failure(outcome: &RunOutcome) {
    let Some(error) = &outcome.error else {
        return;
    };
    eprintln!("error: {error}");
    if outcome.qc.has_missing_columns() {
        eprintln!("  Expected: {}", REQUIRED_COLUMNS.join(", "));
        eprintln!("  Hint: use --map target=source to rename headers");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
