use thiserror::Error;

/// Reasons a single forecast report is rejected
///
/// These never abort a consolidation run; the driver records them against the
/// file and moves on.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Malformed filename: {0}")]
    MalformedFilename(String),

    #[error("Unreadable spreadsheet: {0}")]
    UnreadableSpreadsheet(String),

    #[error("Unexpected layout: {0}")]
    UnexpectedLayout(String),
}
