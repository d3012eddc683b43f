//! Formatted Excel report writer. Produces `Final_Report.xlsx` with a
//! Dashboard sheet (KPI cards plus QC notes), Weekly / Top_Products /
//! Top_Regions data sheets, and the full cleaned dataset as an Excel table.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, Table, TableColumn, TableStyle, Workbook, Worksheet, XlsxError,
};
use srescue_model::{CategoryTotal, CleanRow, KpiSet, QcReport, RescueError, WeeklyRow};
use tracing::info;

pub const REPORT_FILE_NAME: &str = "Final_Report.xlsx";

const HEADER_COLOR: Color = Color::RGB(0x2F5496);
const SUBTITLE_COLOR: Color = Color::RGB(0x808080);
const WARN_COLOR: Color = Color::RGB(0xCC6600);
const NOTE_FILL: Color = Color::RGB(0xFFF2CC);
const KPI_FILL: Color = Color::RGB(0xD6E4F0);

const CURRENCY_FMT: &str = "#,##0.00";
const INT_FMT: &str = "#,##0";
const PCT_FMT: &str = "0.0\"%\"";

const ISO_DATE: &str = "%Y-%m-%d";

/// Everything the report needs, borrowed from the pipeline outputs.
/// `generated_at_utc` is preformatted so the writer stays clock-free.
pub struct ReportInputs<'a> {
    pub rows: &'a [CleanRow],
    pub kpis: &'a KpiSet,
    pub weekly: &'a [WeeklyRow],
    pub top_products: &'a [CategoryTotal],
    pub top_regions: &'a [CategoryTotal],
    pub qc: &'a QcReport,
    pub generated_at_utc: &'a str,
}

/// Neutralize spreadsheet formula injection: any string that Excel would
/// treat as a formula gets a leading apostrophe.
pub fn escape_formula(value: &str) -> Cow<'_, str> {
    if value.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{value}"))
    } else {
        Cow::Borrowed(value)
    }
}

struct Styles {
    header: Format,
    title: Format,
    subtitle: Format,
    note: Format,
    note_label: Format,
    warn: Format,
    kpi_label: Format,
    kpi_value: Format,
    kpi_currency: Format,
    kpi_pct: Format,
    kpi_int: Format,
    currency: Format,
    int: Format,
}

impl Styles {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(HEADER_COLOR)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
        let kpi_label = Format::new().set_bold().set_background_color(KPI_FILL);
        let kpi_value = Format::new().set_background_color(KPI_FILL);
        Self {
            header,
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_font_color(HEADER_COLOR),
            subtitle: Format::new()
                .set_font_size(10)
                .set_font_color(SUBTITLE_COLOR),
            note: Format::new().set_background_color(NOTE_FILL),
            note_label: Format::new().set_bold().set_background_color(NOTE_FILL),
            warn: Format::new()
                .set_italic()
                .set_font_size(10)
                .set_font_color(WARN_COLOR)
                .set_background_color(NOTE_FILL),
            kpi_currency: kpi_value.clone().set_num_format(CURRENCY_FMT),
            kpi_pct: kpi_value.clone().set_num_format(PCT_FMT),
            kpi_int: kpi_value.clone().set_num_format(INT_FMT),
            kpi_label,
            kpi_value,
            currency: Format::new().set_num_format(CURRENCY_FMT),
            int: Format::new().set_num_format(INT_FMT),
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn write_headers(ws: &mut Worksheet, headers: &[&str], styles: &Styles) -> Result<(), XlsxError> {
    for (col, name) in headers.iter().enumerate() {
        ws.write_string_with_format(0, col as u16, *name, &styles.header)?;
    }
    Ok(())
}

fn write_dashboard(
    ws: &mut Worksheet,
    inputs: &ReportInputs<'_>,
    styles: &Styles,
) -> Result<(), XlsxError> {
    ws.set_name("Dashboard")?;

    ws.merge_range(0, 0, 0, 3, "spreadsheet-rescue — Dashboard", &styles.title)?;
    ws.merge_range(
        1,
        0,
        1,
        3,
        &format!("Generated {}", inputs.generated_at_utc),
        &styles.subtitle,
    )?;

    let qc = inputs.qc;
    let mut row: u32 = 3;
    ws.merge_range(row, 0, row, 3, "Notes", &styles.note_label)?;
    row += 1;
    ws.write_string_with_format(row, 0, format!("Rows in: {}", qc.rows_in), &styles.note)?;
    ws.write_string_with_format(row, 1, format!("Rows out: {}", qc.rows_out), &styles.note)?;
    ws.write_string_with_format(row, 2, format!("Dropped: {}", qc.dropped_rows), &styles.note)?;
    ws.write_blank(row, 3, &styles.note)?;
    row += 1;
    if qc.warnings.is_empty() {
        ws.write_string_with_format(row, 0, "No warnings", &styles.warn)?;
        for col in 1..4 {
            ws.write_blank(row, col, &styles.note)?;
        }
        row += 1;
    } else {
        for warning in &qc.warnings {
            let text = format!("⚠ {}", warning.message);
            ws.write_string_with_format(row, 0, escape_formula(&text).as_ref(), &styles.warn)?;
            for col in 1..4 {
                ws.write_blank(row, col, &styles.note)?;
            }
            row += 1;
        }
    }

    row += 1;
    ws.write_string_with_format(row, 0, "Key Metrics", &styles.kpi_label)?;
    ws.write_blank(row, 1, &styles.kpi_value)?;
    row += 1;

    let kpis = inputs.kpis;
    let metrics: [(&str, f64, &Format); 4] = [
        ("Total Revenue", to_f64(kpis.total_revenue), &styles.kpi_currency),
        ("Total Profit", to_f64(kpis.total_profit), &styles.kpi_currency),
        ("Profit Margin %", to_f64(kpis.profit_margin_pct), &styles.kpi_pct),
        ("Total Units", to_f64(kpis.total_units), &styles.kpi_int),
    ];
    for (label, value, format) in metrics {
        ws.write_string_with_format(row, 0, label, &styles.kpi_label)?;
        ws.write_number_with_format(row, 1, value, format)?;
        row += 1;
    }
    let names: [(&str, Option<&String>); 2] = [
        ("Top Product", kpis.top_product.as_ref()),
        ("Top Region", kpis.top_region.as_ref()),
    ];
    for (label, value) in names {
        ws.write_string_with_format(row, 0, label, &styles.kpi_label)?;
        let text = value.map(String::as_str).unwrap_or("—");
        ws.write_string_with_format(row, 1, escape_formula(text).as_ref(), &styles.kpi_value)?;
        row += 1;
    }

    ws.set_column_width(0, 22)?;
    ws.set_column_width(1, 22)?;
    ws.set_column_width(2, 18)?;
    ws.set_column_width(3, 18)?;
    Ok(())
}

fn write_weekly(
    ws: &mut Worksheet,
    weekly: &[WeeklyRow],
    styles: &Styles,
) -> Result<(), XlsxError> {
    ws.set_name("Weekly")?;
    write_headers(ws, &["week", "revenue", "cost", "profit", "units"], styles)?;
    for (i, row) in weekly.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, row.week.format(ISO_DATE).to_string())?;
        ws.write_number_with_format(r, 1, to_f64(row.revenue), &styles.currency)?;
        ws.write_number_with_format(r, 2, to_f64(row.cost), &styles.currency)?;
        ws.write_number_with_format(r, 3, to_f64(row.profit), &styles.currency)?;
        ws.write_number_with_format(r, 4, to_f64(row.units), &styles.int)?;
    }
    ws.set_freeze_panes(1, 0)?;
    ws.autofit();
    Ok(())
}

fn write_category(
    ws: &mut Worksheet,
    sheet_name: &str,
    column_name: &str,
    totals: &[CategoryTotal],
    styles: &Styles,
) -> Result<(), XlsxError> {
    ws.set_name(sheet_name)?;
    write_headers(ws, &[column_name, "revenue", "profit"], styles)?;
    for (i, total) in totals.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, escape_formula(&total.name).as_ref())?;
        ws.write_number_with_format(r, 1, to_f64(total.revenue), &styles.currency)?;
        ws.write_number_with_format(r, 2, to_f64(total.profit), &styles.currency)?;
    }
    ws.set_freeze_panes(1, 0)?;
    ws.autofit();
    Ok(())
}

fn write_clean_data(
    ws: &mut Worksheet,
    rows: &[CleanRow],
    styles: &Styles,
) -> Result<(), XlsxError> {
    ws.set_name("Clean_Data")?;
    let headers = [
        "date", "product", "region", "revenue", "cost", "units", "profit", "week",
    ];
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        ws.write_string(r, 0, row.date.format(ISO_DATE).to_string())?;
        ws.write_string(r, 1, escape_formula(&row.product).as_ref())?;
        ws.write_string(r, 2, escape_formula(&row.region).as_ref())?;
        ws.write_number_with_format(r, 3, to_f64(row.revenue), &styles.currency)?;
        ws.write_number_with_format(r, 4, to_f64(row.cost), &styles.currency)?;
        ws.write_number_with_format(r, 5, to_f64(row.units), &styles.int)?;
        ws.write_number_with_format(r, 6, to_f64(row.profit), &styles.currency)?;
        ws.write_string(r, 7, row.week.format(ISO_DATE).to_string())?;
    }
    if rows.is_empty() {
        // An Excel table needs at least one data row; fall back to a plain
        // styled header.
        write_headers(ws, &headers, styles)?;
    } else {
        let columns: Vec<TableColumn> = headers
            .iter()
            .map(|name| TableColumn::new().set_header(*name))
            .collect();
        let table = Table::new()
            .set_name("Clean_Data")
            .set_style(TableStyle::Medium9)
            .set_columns(&columns);
        ws.add_table(0, 0, rows.len() as u32, (headers.len() - 1) as u16, &table)?;
    }
    ws.set_freeze_panes(1, 0)?;
    ws.autofit();
    Ok(())
}

fn build_workbook(inputs: &ReportInputs<'_>) -> Result<Workbook, XlsxError> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();
    write_dashboard(workbook.add_worksheet(), inputs, &styles)?;
    write_weekly(workbook.add_worksheet(), inputs.weekly, &styles)?;
    write_category(
        workbook.add_worksheet(),
        "Top_Products",
        "product",
        inputs.top_products,
        &styles,
    )?;
    write_category(
        workbook.add_worksheet(),
        "Top_Regions",
        "region",
        inputs.top_regions,
        &styles,
    )?;
    write_clean_data(workbook.add_worksheet(), inputs.rows, &styles)?;
    Ok(workbook)
}

/// Write `Final_Report.xlsx` under `out_dir` and return its path.
pub fn write_report(out_dir: &Path, inputs: &ReportInputs<'_>) -> srescue_model::Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(REPORT_FILE_NAME);
    let mut workbook = build_workbook(inputs)
        .map_err(|e| RescueError::Message(format!("failed to build report: {e}")))?;
    workbook
        .save(&path)
        .map_err(|e| RescueError::Message(format!("failed to write {}: {e}", path.display())))?;
    info!(path = %path.display(), rows = inputs.rows.len(), "wrote report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_prefixes_are_neutralized() {
        assert_eq!(escape_formula("=SUM(A1:A9)"), "'=SUM(A1:A9)");
        assert_eq!(escape_formula("+1"), "'+1");
        assert_eq!(escape_formula("-lookup"), "'-lookup");
        assert_eq!(escape_formula("@cmd"), "'@cmd");
    }

    #[test]
    fn ordinary_strings_pass_through_unchanged() {
        assert!(matches!(escape_formula("Widget"), Cow::Borrowed("Widget")));
        assert!(matches!(escape_formula(""), Cow::Borrowed("")));
        // Only the first character matters.
        assert!(matches!(escape_formula("a=b"), Cow::Borrowed("a=b")));
    }
}
