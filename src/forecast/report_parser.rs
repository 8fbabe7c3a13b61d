/// Daily Forecast Report Parser
///
/// Reads one forecast report spreadsheet into tidy `(date, time_of_day,
/// demand_mw)` readings. The report date comes from the file name, never from
/// the sheet contents.
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::cell::{coerce_demand, render_period_label};
use super::error::ReportError;
use super::layout::{
    check_header, sheet_size, LayoutMode, DEMAND_COL, FIRST_DATA_ROW, MIN_COLS, MIN_ROWS,
    PERIOD_COL,
};
use crate::utils::extract_report_date;

/// A forecast report file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub report_date: NaiveDate,
}

impl SourceFile {
    /// Build from a path, deriving the report date from the file name
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let path = path.into();
        let report_date = extract_report_date(&path)?;
        Ok(Self { path, report_date })
    }
}

/// One forecast reading: the demand expected for a period of the report day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReading {
    pub date: NaiveDate,
    /// Period label exactly as shown in the report
    pub time_of_day: String,
    pub demand_mw: f64,
}

/// Parser for daily forecast report spreadsheets (e.g. nr_forecast_report_01-01-2026.xlsx)
pub struct ForecastReportParser {
    workbook_path: PathBuf,
    layout_mode: LayoutMode,
}

impl ForecastReportParser {
    pub fn new(workbook_path: impl Into<PathBuf>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
            layout_mode: LayoutMode::default(),
        }
    }

    pub fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook_path
    }

    /// Parse the first worksheet of the report
    ///
    /// # Expected Sheet Structure:
    /// ```text
    /// Row 1-3: Title and banner text
    /// Row 4:   Column headers (col B "Period", col E demand in MW)
    /// Row 5-:  One row per period, then footer/blank/repeated header rows
    /// ```
    ///
    /// A misnamed file is rejected before the workbook is opened.
    pub fn parse(&self) -> Result<Vec<ForecastReading>, ReportError> {
        let source = SourceFile::from_path(&self.workbook_path)?;

        let mut workbook = open_workbook_auto(&self.workbook_path).map_err(|e| {
            ReportError::UnreadableSpreadsheet(format!(
                "failed to open {}: {e}",
                self.workbook_path.display()
            ))
        })?;

        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => {
                return Err(ReportError::UnreadableSpreadsheet(format!(
                    "failed to read first sheet of {}: {e}",
                    self.workbook_path.display()
                )))
            }
            None => {
                return Err(ReportError::UnreadableSpreadsheet(format!(
                    "{} has no worksheets",
                    self.workbook_path.display()
                )))
            }
        };

        let readings = self.parse_range(&range, source.report_date)?;
        debug!(
            "Parsed {} readings from {}",
            readings.len(),
            self.workbook_path.display()
        );
        Ok(readings)
    }

    /// Extract readings from an already loaded worksheet range
    ///
    /// Every row from `FIRST_DATA_ROW` onward is considered. Rows whose
    /// demand cell does not coerce to a number are dropped; that is the only
    /// row filter.
    pub fn parse_range(
        &self,
        range: &Range<Data>,
        report_date: NaiveDate,
    ) -> Result<Vec<ForecastReading>, ReportError> {
        let (rows, cols) = sheet_size(range);
        if rows < MIN_ROWS || cols < MIN_COLS {
            return Err(ReportError::UnreadableSpreadsheet(format!(
                "sheet is {rows}x{cols}, need at least {MIN_ROWS} rows and {MIN_COLS} columns"
            )));
        }

        if let Err(mismatch) = check_header(range) {
            match self.layout_mode {
                LayoutMode::Strict => return Err(ReportError::UnexpectedLayout(mismatch)),
                LayoutMode::Lenient => warn!(
                    "{}: {mismatch}; trusting fixed offsets",
                    self.workbook_path.display()
                ),
            }
        }

        let readings = (FIRST_DATA_ROW..rows)
            .filter_map(|row| {
                let demand_mw = coerce_demand(range.get_value((row, DEMAND_COL)))?;
                Some(ForecastReading {
                    date: report_date,
                    time_of_day: render_period_label(range.get_value((row, PERIOD_COL))),
                    demand_mw,
                })
            })
            .collect();

        Ok(readings)
    }
}
