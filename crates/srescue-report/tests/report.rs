//! Report writer checked against a real workbook read back from disk.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use srescue_model::{CategoryTotal, CleanRow, KpiSet, QcReport, WeeklyRow};
use srescue_report::{write_report, ReportInputs, REPORT_FILE_NAME};

fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "srescue-report-test-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_rows() -> Vec<CleanRow> {
    vec![
        CleanRow {
            date: date(2024, 1, 2),
            product: "Widget".into(),
            region: "North".into(),
            revenue: Decimal::new(120050, 2),
            cost: Decimal::new(80000, 2),
            units: Decimal::new(3, 0),
            profit: Decimal::new(40050, 2),
            week: date(2024, 1, 1),
        },
        CleanRow {
            date: date(2024, 1, 3),
            product: "=SUM(A1:A9)".into(),
            region: "South".into(),
            revenue: Decimal::new(50000, 2),
            cost: Decimal::new(20000, 2),
            units: Decimal::new(1, 0),
            profit: Decimal::new(30000, 2),
            week: date(2024, 1, 1),
        },
    ]
}

fn sample_inputs<'a>(
    rows: &'a [CleanRow],
    kpis: &'a KpiSet,
    weekly: &'a [WeeklyRow],
    products: &'a [CategoryTotal],
    regions: &'a [CategoryTotal],
    qc: &'a QcReport,
) -> ReportInputs<'a> {
    ReportInputs {
        rows,
        kpis,
        weekly,
        top_products: products,
        top_regions: regions,
        qc,
        generated_at_utc: "2024-01-05 12:00 UTC",
    }
}

#[test]
fn report_contains_all_five_sheets() {
    let rows = sample_rows();
    let kpis = KpiSet {
        total_revenue: Decimal::new(170050, 2),
        total_cost: Decimal::new(100000, 2),
        total_profit: Decimal::new(70050, 2),
        profit_margin_pct: Decimal::new(4119, 2),
        total_units: Decimal::new(4, 0),
        top_product: Some("Widget".into()),
        top_region: Some("North".into()),
    };
    let weekly = vec![WeeklyRow {
        week: date(2024, 1, 1),
        revenue: Decimal::new(170050, 2),
        cost: Decimal::new(100000, 2),
        profit: Decimal::new(70050, 2),
        units: Decimal::new(4, 0),
    }];
    let products = vec![CategoryTotal {
        name: "Widget".into(),
        revenue: Decimal::new(120050, 2),
        profit: Decimal::new(40050, 2),
    }];
    let regions = vec![CategoryTotal {
        name: "North".into(),
        revenue: Decimal::new(120050, 2),
        profit: Decimal::new(40050, 2),
    }];
    let mut qc = QcReport::new(2);
    qc.set_rows_out(2);

    let out_dir = temp_dir();
    let path = write_report(
        &out_dir,
        &sample_inputs(&rows, &kpis, &weekly, &products, &regions, &qc),
    )
    .unwrap();
    assert_eq!(path, out_dir.join(REPORT_FILE_NAME));

    let workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Dashboard", "Weekly", "Top_Products", "Top_Regions", "Clean_Data"]
    );
}

#[test]
fn clean_data_strings_are_escaped_against_formula_injection() {
    let rows = sample_rows();
    let kpis = KpiSet::default();
    let qc = QcReport::new(2);

    let out_dir = temp_dir();
    let path = write_report(&out_dir, &sample_inputs(&rows, &kpis, &[], &[], &[], &qc)).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Clean_Data").unwrap();
    // Second data row, product column: the leading '=' must be neutralized.
    assert_eq!(
        range.get_value((2, 1)),
        Some(&Data::String("'=SUM(A1:A9)".into()))
    );
    // Ordinary strings are untouched.
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("Widget".into())));
}

#[test]
fn empty_dataset_still_produces_a_workbook() {
    let kpis = KpiSet::default();
    let mut qc = QcReport::new(0);
    qc.set_rows_out(0);

    let out_dir = temp_dir();
    let path = write_report(&out_dir, &sample_inputs(&[], &kpis, &[], &[], &[], &qc)).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Clean_Data").unwrap();
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("date".into())));
    assert_eq!(range.height(), 1);
}
