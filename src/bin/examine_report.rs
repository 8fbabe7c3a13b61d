/// Dump the first sheet of a forecast report to check its layout
use calamine::{open_workbook_auto, DataType, Reader};
use std::env;

use forecast_consolidator::forecast::layout::{
    check_header, sheet_size, DEMAND_COL, FIRST_DATA_ROW, HEADER_ROW, PERIOD_COL,
};
use forecast_consolidator::forecast::ForecastReportParser;
use forecast_consolidator::utils::extract_report_date;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = args.get(1) else {
        eprintln!("usage: examine-report <report.xlsx> [max_rows]");
        std::process::exit(2);
    };
    let max_rows: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(40);

    println!("Opening forecast report: {file_path}");
    match extract_report_date(file_path) {
        Ok(date) => println!("Report date (from filename): {date}"),
        Err(e) => println!("Report date: {e}"),
    }

    let mut workbook = open_workbook_auto(file_path)?;

    println!("\nSheet names:");
    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("  {i}: {name}");
    }

    let range = workbook
        .worksheet_range_at(0)
        .ok_or("workbook has no worksheets")??;

    println!("\n{}", "=".repeat(100));
    println!("Dimensions from A1: {:?}", sheet_size(&range));
    println!(
        "Header row {HEADER_ROW}, data from row {FIRST_DATA_ROW}, period col {PERIOD_COL}, demand col {DEMAND_COL}"
    );
    match check_header(&range) {
        Ok(()) => println!("Header labels: OK"),
        Err(mismatch) => println!("Header labels: {mismatch}"),
    }
    println!("{}", "=".repeat(100));

    let (rows, _) = sheet_size(&range);
    for row_idx in 0..rows.min(max_rows as u32) {
        print!("Row {row_idx:3}: ");
        for col_idx in 0..=DEMAND_COL + 1 {
            match range.get_value((row_idx, col_idx)) {
                Some(cell) if !cell.is_empty() => print!("[{cell}] "),
                _ => print!("[empty] "),
            }
        }
        println!();
    }

    println!("\n{}", "=".repeat(100));
    match ForecastReportParser::new(file_path).parse() {
        Ok(readings) => {
            println!("Parsed {} readings", readings.len());
            for reading in readings.iter().take(5) {
                println!(
                    "  {} {} {}",
                    reading.date, reading.time_of_day, reading.demand_mw
                );
            }
        }
        Err(e) => println!("Report would be skipped: {e}"),
    }

    Ok(())
}
