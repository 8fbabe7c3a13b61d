use chrono::NaiveDate;
use glob::{glob_with, MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::forecast::{ForecastReading, ForecastReportParser};
use crate::output::{persist_readings, OutputError};
use crate::utils::format_thousands;

/// Office writes `~$name.xlsx` lock files next to open workbooks
const LOCK_FILE_PREFIX: &str = "~$";

/// Error types for a consolidation run
///
/// Per-file problems never show up here; they are recorded as `SkippedFile`.
#[derive(Debug, thiserror::Error)]
pub enum ConsolidateError {
    #[error("Input directory not found: {0}")]
    InvalidInputRoot(PathBuf),

    #[error("File discovery failed: {0}")]
    Discovery(String),

    #[error(
        "No rows to write: {} file(s) scanned, {} skipped",
        .0.files_scanned,
        .0.skipped.len()
    )]
    EmptyResultSet(Box<ConsolidationSummary>),

    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),
}

/// A report that contributed no rows, and why
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Path relative to the input root where possible
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a consolidation run
#[derive(Debug, Clone, Default)]
pub struct ConsolidationSummary {
    pub files_scanned: usize,
    pub files_succeeded: usize,
    pub skipped: Vec<SkippedFile>,
    pub row_count: usize,
    pub date_span: Option<(NaiveDate, NaiveDate)>,
    /// Set only when the table was written
    pub output_path: Option<PathBuf>,
}

impl ConsolidationSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl fmt::Display for ConsolidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for skipped in &self.skipped {
            writeln!(f, "  [WARN]  {}: {}", skipped.path.display(), skipped.reason)?;
        }

        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Consolidation Summary")?;
        writeln!(f, "{}", "=".repeat(60))?;
        write!(
            f,
            "Processed:          {}/{} file(s)",
            self.files_succeeded, self.files_scanned
        )?;
        if !self.skipped.is_empty() {
            write!(f, "  ({} skipped)", self.skipped.len())?;
        }
        writeln!(f)?;
        writeln!(f, "Rows:               {}", format_thousands(self.row_count))?;
        match self.date_span {
            Some((first, last)) => writeln!(f, "Date span:          {first} to {last}")?,
            None => writeln!(f, "Date span:          n/a")?,
        }
        match &self.output_path {
            Some(path) => writeln!(f, "Output:             {}", path.display())?,
            None => writeln!(f, "Output:             (not written)")?,
        }
        write!(f, "{}", "=".repeat(60))
    }
}

/// Sort readings by `(date, time_of_day)`, keeping source order for ties
pub fn sort_readings(readings: &mut [ForecastReading]) {
    readings.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.time_of_day.cmp(&b.time_of_day))
    });
}

/// Earliest and latest date present in the readings
pub fn date_span(readings: &[ForecastReading]) -> Option<(NaiveDate, NaiveDate)> {
    let first = readings.iter().map(|r| r.date).min()?;
    let last = readings.iter().map(|r| r.date).max()?;
    Some((first, last))
}

/// Batch driver: discover reports, parse each, write one sorted table
pub struct Consolidator {
    config: Config,
}

impl Consolidator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Find every report file under the input root, at any depth
    ///
    /// Extensions match case-insensitively. The result is sorted lexically and
    /// free of duplicates.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, ConsolidateError> {
        let root = &self.config.input_dir;
        if !root.is_dir() {
            return Err(ConsolidateError::InvalidInputRoot(root.clone()));
        }

        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let escaped_root = Pattern::escape(&root.to_string_lossy());

        let mut files = Vec::new();
        for ext in &self.config.extensions {
            let pattern = format!("{escaped_root}/**/*.{}", Pattern::escape(ext));
            let entries = glob_with(&pattern, options)
                .map_err(|e| ConsolidateError::Discovery(format!("{pattern}: {e}")))?;

            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() && !is_lock_file(&path) => files.push(path),
                    Ok(path) => debug!("Ignoring {}", path.display()),
                    Err(e) => warn!("Unreadable path during discovery: {e}"),
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Run a full consolidation
    ///
    /// Either the whole table is written to the output file, or nothing is.
    #[instrument(skip(self), fields(input_dir = %self.config.input_dir.display()))]
    pub fn run(&self) -> Result<ConsolidationSummary, ConsolidateError> {
        let start_time = Instant::now();
        let files = self.discover_files()?;
        info!(
            "Scanning {} file(s) -> {}",
            files.len(),
            self.config.output_file.display()
        );

        let (mut readings, mut summary) = self.parse_files(&files);

        if readings.is_empty() {
            warn!("No files could be processed, nothing written");
            return Err(ConsolidateError::EmptyResultSet(Box::new(summary)));
        }

        sort_readings(&mut readings);
        persist_readings(&self.config.output_file, &readings)?;

        summary.row_count = readings.len();
        summary.date_span = date_span(&readings);
        summary.output_path = Some(self.config.output_file.clone());

        info!(
            "Consolidated {} rows from {}/{} file(s) in {:.2}s",
            summary.row_count,
            summary.files_succeeded,
            summary.files_scanned,
            start_time.elapsed().as_secs_f64()
        );
        Ok(summary)
    }

    /// Parse every file, downgrading per-file failures to skipped entries
    pub fn parse_files(&self, files: &[PathBuf]) -> (Vec<ForecastReading>, ConsolidationSummary) {
        let pb = self.progress_bar(files.len() as u64);
        let mut summary = ConsolidationSummary {
            files_scanned: files.len(),
            ..Default::default()
        };
        let mut readings = Vec::new();

        for path in files {
            let parser =
                ForecastReportParser::new(path).with_layout_mode(self.config.layout_mode);

            match parser.parse() {
                Ok(mut file_readings) => {
                    debug!(
                        "{}: {} readings",
                        self.display_path(path).display(),
                        file_readings.len()
                    );
                    summary.files_succeeded += 1;
                    readings.append(&mut file_readings);
                }
                Err(e) => {
                    let skipped = SkippedFile {
                        path: self.display_path(path),
                        reason: e.to_string(),
                    };
                    pb.suspend(|| warn!("Skipping {}: {}", skipped.path.display(), skipped.reason));
                    summary.skipped.push(skipped);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        summary.row_count = readings.len();
        summary.date_span = date_span(&readings);
        (readings, summary)
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.config.input_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template("  Processing... {pos}/{len} {bar:40.cyan/blue} {wide_msg}")
            .map(|style| style.progress_chars("##-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let pb = ProgressBar::new(len);
        pb.set_style(style);
        pb
    }
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with(LOCK_FILE_PREFIX))
        .unwrap_or(false)
}
