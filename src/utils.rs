//! Shared utility functions for the forecast consolidator

use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;

use crate::forecast::ReportError;

/// Extract the report date embedded in a forecast report file name
///
/// Report files carry the day they cover only in their name, as a
/// `DD-MM-YYYY` or `DD_MM_YYYY` token. The two separators do not have to
/// match. Directory components of a path are never inspected, only the
/// final file name.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use forecast_consolidator::utils::extract_report_date;
///
/// assert_eq!(
///     extract_report_date("nr_forecast_report_01-01-2026.xlsx").unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
/// );
/// assert_eq!(
///     extract_report_date("nr_forecast_report_22_04_2025.xlsx").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 22).unwrap()
/// );
/// assert!(extract_report_date("report_badname.xlsx").is_err());
/// ```
pub fn extract_report_date(path: impl AsRef<Path>) -> Result<NaiveDate, ReportError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let re = Regex::new(r"(\d{2})[_-](\d{2})[_-](\d{4})")
        .map_err(|e| ReportError::MalformedFilename(format!("{file_name}: {e}")))?;

    let caps = re.captures(&file_name).ok_or_else(|| {
        ReportError::MalformedFilename(format!("date not found in filename: {file_name}"))
    })?;

    // Two-digit and four-digit groups always fit their integer types
    let day: u32 = caps[1].parse().unwrap_or_default();
    let month: u32 = caps[2].parse().unwrap_or_default();
    let year: i32 = caps[3].parse().unwrap_or_default();

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ReportError::MalformedFilename(format!(
            "invalid calendar date {}-{}-{} in filename: {file_name}",
            &caps[1], &caps[2], &caps[3]
        ))
    })
}

/// Format a count with thousands separators, e.g. `12345` as `12,345`
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
