// Forecast report module
//
// This module handles reading daily demand forecast reports published by the
// grid operator. Each report is one spreadsheet covering one calendar day:
// - Rows 0-2: report title and banner text
// - Row 3: column header labels
// - Row 4 onward: one row per sub-daily period, followed by footer rows

pub mod cell;
pub mod error;
pub mod layout;
pub mod report_parser;

pub use error::ReportError;
pub use layout::LayoutMode;
pub use report_parser::{ForecastReading, ForecastReportParser, SourceFile};
