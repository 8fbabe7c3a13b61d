use std::env;
use std::path::PathBuf;

use crate::forecast::LayoutMode;

pub const DEFAULT_INPUT_DIR: &str = "data/raw";
pub const DEFAULT_OUTPUT_FILE: &str = "data/extracted/nrldc_extracted.csv";
pub const DEFAULT_EXTENSION: &str = "xlsx";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Where to read reports from and where to write the consolidated table
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the `<year>/<month>/<report>.xlsx` tree
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    /// File extensions to pick up, without the leading dot
    pub extensions: Vec<String>,
    pub layout_mode: LayoutMode,
    pub show_progress: bool,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Config {
            input_dir: input_dir.into(),
            output_file: output_file.into(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            layout_mode: LayoutMode::default(),
            show_progress: false,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let strict = match env::var("FORECAST_STRICT_LAYOUT") {
            Ok(value) => parse_bool("FORECAST_STRICT_LAYOUT", &value)?,
            Err(_) => false,
        };

        Ok(Config {
            input_dir: env::var("FORECAST_INPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_INPUT_DIR.to_string())
                .into(),
            output_file: env::var("FORECAST_OUTPUT_FILE")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_FILE.to_string())
                .into(),
            extensions: env::var("FORECAST_EXTENSIONS")
                .map(|value| parse_extensions(&value))
                .unwrap_or_else(|_| vec![DEFAULT_EXTENSION.to_string()]),
            layout_mode: if strict {
                LayoutMode::Strict
            } else {
                LayoutMode::Lenient
            },
            show_progress: true,
        })
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed: Vec<String> = extensions
            .into_iter()
            .flat_map(|ext| parse_extensions(ext.as_ref()))
            .collect();
        if !parsed.is_empty() {
            self.extensions = parsed;
        }
        self
    }

    pub fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Split a comma list like `xlsx, .XLS` into `["xlsx", "xls"]`
fn parse_extensions(value: &str) -> Vec<String> {
    let mut extensions: Vec<String> = value
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect();
    extensions.dedup();

    if extensions.is_empty() {
        vec![DEFAULT_EXTENSION.to_string()]
    } else {
        extensions
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}
