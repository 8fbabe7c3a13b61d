// Tests for ForecastReportParser against sample report workbooks

mod common;

use calamine::{open_workbook_auto, Reader};
use chrono::NaiveDate;
use common::{place_bytes, place_fixture, FIXTURES};
use forecast_consolidator::forecast::{ForecastReportParser, LayoutMode, ReportError};

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

#[test]
fn test_parse_three_valid_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_fixture(
        dir.path(),
        "forecast_three_rows.xlsx",
        "nr_forecast_report_01-01-2026.xlsx",
    );

    let readings = ForecastReportParser::new(&path).parse().unwrap();

    assert_eq!(readings.len(), 3);
    let demands: Vec<f64> = readings.iter().map(|r| r.demand_mw).collect();
    assert_eq!(demands, vec![100.0, 200.0, 300.0]);
    let periods: Vec<&str> = readings.iter().map(|r| r.time_of_day.as_str()).collect();
    assert_eq!(periods, vec!["00:00", "00:15", "00:30"]);
    assert!(readings.iter().all(|r| r.date == jan(1)));
}

#[test]
fn test_parse_header_repeat_row_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_fixture(
        dir.path(),
        "forecast_header_repeat.xlsx",
        "nr_forecast_report_02-01-2026.xlsx",
    );

    let readings = ForecastReportParser::new(&path).parse().unwrap();

    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].date, jan(2));
    assert_eq!(readings[0].demand_mw, 50.0);
}

#[test]
fn test_parse_interleaved_non_numeric_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_fixture(
        dir.path(),
        "forecast_interleaved.xlsx",
        "nr_forecast_report_03-01-2026.xlsx",
    );

    let readings = ForecastReportParser::new(&path).parse().unwrap();

    let rows: Vec<(&str, f64)> = readings
        .iter()
        .map(|r| (r.time_of_day.as_str(), r.demand_mw))
        .collect();
    // "Section A", blank, header repeat, "N/A" and footer rows are all gone
    assert_eq!(rows, vec![("00:00", 10.0), ("00:15", 20.5), ("00:45", 30.0)]);
}

#[test]
fn test_parse_leading_blank_rows_use_absolute_offsets() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_fixture(
        dir.path(),
        "forecast_leading_blank_rows.xlsx",
        "nr_forecast_report_04-01-2026.xlsx",
    );

    let readings = ForecastReportParser::new(&path).parse().unwrap();

    let demands: Vec<f64> = readings.iter().map(|r| r.demand_mw).collect();
    assert_eq!(demands, vec![111.5, 222.25]);
}

#[test]
fn test_parse_short_sheet_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_fixture(
        dir.path(),
        "forecast_short.xlsx",
        "nr_forecast_report_05-01-2026.xlsx",
    );

    match ForecastReportParser::new(&path).parse() {
        Err(ReportError::UnreadableSpreadsheet(msg)) => assert!(msg.contains("at least")),
        other => panic!("Expected UnreadableSpreadsheet, got {other:?}"),
    }
}

#[test]
fn test_parse_renamed_headers_lenient_and_strict() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_fixture(
        dir.path(),
        "forecast_renamed_headers.xlsx",
        "nr_forecast_report_06-01-2026.xlsx",
    );

    let lenient = ForecastReportParser::new(&path).parse().unwrap();
    assert_eq!(lenient.len(), 2);

    let strict = ForecastReportParser::new(&path)
        .with_layout_mode(LayoutMode::Strict)
        .parse();
    match strict {
        Err(ReportError::UnexpectedLayout(msg)) => {
            assert!(msg.contains("Block"));
            assert!(msg.contains("Schedule"));
        }
        other => panic!("Expected UnexpectedLayout, got {other:?}"),
    }
}

#[test]
fn test_parse_not_a_spreadsheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_bytes(
        dir.path(),
        "nr_forecast_report_07-01-2026.xlsx",
        b"<html>session expired</html>",
    );

    let result = ForecastReportParser::new(&path).parse();
    assert!(matches!(result, Err(ReportError::UnreadableSpreadsheet(_))));
}

#[test]
fn test_parse_valid_body_misnamed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = place_fixture(dir.path(), "forecast_three_rows.xlsx", "report_badname.xlsx");

    let result = ForecastReportParser::new(&path).parse();
    assert!(matches!(result, Err(ReportError::MalformedFilename(_))));
}

#[test]
fn test_parse_range_from_opened_workbook() {
    let mut workbook = open_workbook_auto(format!("{FIXTURES}/forecast_three_rows.xlsx"))
        .expect("Failed to open forecast_three_rows.xlsx");
    let range = workbook
        .worksheet_range_at(0)
        .expect("workbook has a sheet")
        .expect("Failed to read first sheet");

    let readings = ForecastReportParser::new("in-memory")
        .parse_range(&range, jan(9))
        .unwrap();

    assert_eq!(readings.len(), 3);
    assert!(readings.iter().all(|r| r.date == jan(9)));
}

#[test]
fn test_error_display() {
    let err = ReportError::MalformedFilename("report_badname.xlsx".to_string());
    assert!(err.to_string().contains("report_badname.xlsx"));

    let err = ReportError::UnreadableSpreadsheet("bad zip".to_string());
    assert!(err.to_string().contains("bad zip"));

    let err = ReportError::UnexpectedLayout("header row 3".to_string());
    assert!(err.to_string().contains("header row 3"));
}
