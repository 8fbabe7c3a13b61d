// Fixed layout of a daily forecast report
//
// The upstream report format has no structural end-of-data marker, so the
// offsets below are trusted as-is and non-data rows are dropped by numeric
// coercion of the demand column. Header labels are checked only to surface
// format drift.

use calamine::{Data, Range};

use super::cell::render_period_label;

/// Row holding the column header labels (0-based, absolute sheet row)
pub const HEADER_ROW: u32 = 3;
/// First row that may hold a forecast reading
pub const FIRST_DATA_ROW: u32 = 4;
/// Column holding the period / time-of-day label
pub const PERIOD_COL: u32 = 1;
/// Column holding the forecast demand in MW
pub const DEMAND_COL: u32 = 4;

pub const MIN_ROWS: u32 = FIRST_DATA_ROW + 1;
pub const MIN_COLS: u32 = DEMAND_COL + 1;

const PERIOD_LABEL_HINTS: [&str; 2] = ["period", "time"];
const DEMAND_LABEL_HINTS: [&str; 2] = ["demand", "mw"];

/// How to treat a header row whose labels do not look like a forecast report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Warn and trust the fixed offsets anyway
    #[default]
    Lenient,
    /// Reject the file
    Strict,
}

/// Number of rows and columns of the sheet, counted from cell A1
pub fn sheet_size(range: &Range<Data>) -> (u32, u32) {
    match range.end() {
        Some((last_row, last_col)) => (last_row + 1, last_col + 1),
        None => (0, 0),
    }
}

/// Check the header row labels against what the fixed offsets assume
///
/// Returns a description of every mismatch, or `Ok(())` when both the period
/// and demand labels look right.
pub fn check_header(range: &Range<Data>) -> Result<(), String> {
    let mut problems = Vec::new();

    let period_label = render_period_label(range.get_value((HEADER_ROW, PERIOD_COL)));
    if !label_matches(&period_label, &PERIOD_LABEL_HINTS) {
        problems.push(format!(
            "column {PERIOD_COL} header is '{period_label}', expected a period label"
        ));
    }

    let demand_label = render_period_label(range.get_value((HEADER_ROW, DEMAND_COL)));
    if !label_matches(&demand_label, &DEMAND_LABEL_HINTS) {
        problems.push(format!(
            "column {DEMAND_COL} header is '{demand_label}', expected a demand label"
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(format!("header row {HEADER_ROW}: {}", problems.join("; ")))
    }
}

fn label_matches(label: &str, hints: &[&str]) -> bool {
    let lower = label.to_lowercase();
    hints.iter().any(|hint| lower.contains(hint))
}
