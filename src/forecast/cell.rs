/// Cell coercion for forecast report grids
///
/// Two conversions matter for a forecast row: the demand cell is coerced to a
/// number (anything that is not one becomes "missing"), and the period cell is
/// rendered back to the label text it shows in the sheet.
use calamine::{Data, ExcelDateTime};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Coerce a demand cell to a finite number
///
/// Returns `None` for blanks, text, booleans, dates, error cells and
/// non-finite values. Numeric text such as `" 4523.7 "` is accepted.
/// Footer rows, blank rows and repeated header rows all fall out here.
pub fn coerce_demand(cell: Option<&Data>) -> Option<f64> {
    let value = match cell? {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    value.is_finite().then_some(value)
}

/// Render a period cell as the label shown in the sheet
///
/// Text is kept verbatim. Time-formatted cells holding only a time of day
/// render as `HH:MM:SS`; full date-times as `YYYY-MM-DD HH:MM:SS`.
pub fn render_period_label(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Float(f)) => format_number(*f),
        Some(Data::Bool(true)) => "True".to_string(),
        Some(Data::Bool(false)) => "False".to_string(),
        Some(Data::DateTime(dt)) => render_excel_datetime(dt),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => s.clone(),
        Some(Data::Error(e)) => e.to_string(),
    }
}

/// Shortest decimal form; integral values drop the fraction
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn render_excel_datetime(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();

    if (0.0..1.0).contains(&serial) || dt.is_duration() {
        return format_clock(serial);
    }

    match dt.as_datetime() {
        Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format_number(serial),
    }
}

/// Day fraction (or duration in days) as `HH:MM:SS`
fn format_clock(days: f64) -> String {
    let total = (days * SECONDS_PER_DAY).round().max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
